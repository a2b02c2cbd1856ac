use super::loading::wait_with_spinner;
use crate::output::Output;
use crate::render;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_core::{Action, DetailState, Session, SessionOptions};
use serde_json::json;

/// One-shot detail lookup by IMDb id.
pub async fn run_show(imdb_id: String, output: &Output) -> Result<()> {
    let imdb_id = imdb_id.trim().to_string();
    if imdb_id.is_empty() {
        return Err(eyre!("IMDb id must not be empty"));
    }

    let (path_manager, config) = super::load_config()?;
    let catalog = super::open_catalog(&path_manager, &config)?;
    let mut session = Session::new(catalog, SessionOptions::from_config(&config.search));

    session.dispatch(Action::Select(imdb_id.clone()));
    wait_with_spinner(&mut session, "Loading...").await;

    match session.state().detail() {
        DetailState::Loaded(detail) => {
            if output.is_json() {
                output.json(&json!({ "movie": detail }));
            } else {
                output.block(render::detail_pane(detail, None));
            }
            Ok(())
        }
        // The lookup failure itself is in the log; the pane just stays empty
        _ => Err(eyre!("No details available for {}", imdb_id)),
    }
}
