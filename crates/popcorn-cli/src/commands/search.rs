use super::loading::wait_with_spinner;
use crate::output::Output;
use crate::render;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_core::{Action, Session, SessionOptions};
use serde_json::json;
use tracing::info;

/// One-shot search: run the query once, print the results and exit.
pub async fn run_search(query: String, output: &Output) -> Result<()> {
    let (path_manager, config) = super::load_config()?;
    let catalog = super::open_catalog(&path_manager, &config)?;

    // Nothing to debounce when the query is typed up front
    let options = SessionOptions {
        debounce: std::time::Duration::ZERO,
        ..SessionOptions::from_config(&config.search)
    };
    let mut session = Session::new(catalog, options);

    info!("Searching for '{}'", query);
    session.dispatch(Action::QueryChanged(query.clone()));

    if query.chars().count() < config.search.min_query_len {
        output.warn(format!(
            "Type at least {} characters to search",
            config.search.min_query_len
        ));
        return Ok(());
    }

    wait_with_spinner(&mut session, "Loading...").await;
    let state = session.state();

    if output.is_json() {
        output.json(&json!({
            "query": state.query(),
            "count": state.result_count(),
            "results": state.results(),
            "error": state.search_error(),
        }));
    } else if state.search_error().is_none() {
        if let Some(banner) = state.results_banner() {
            output.info(banner);
        }
        output.block(render::results_table(state.results(), None));
    }

    // Failures become the exit status; color-eyre prints the message
    match state.search_error() {
        Some(message) => Err(eyre!("{}", message)),
        None => Ok(()),
    }
}
