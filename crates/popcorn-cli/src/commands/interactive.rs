use super::loading::wait_with_spinner;
use super::prompts;
use crate::output::Output;
use crate::render;
use color_eyre::Result;
use owo_colors::OwoColorize;
use popcorn_core::{Action, Session, SessionOptions};
use popcorn_models::{UserRating, WatchedEntry};
use popcorn_sources::MovieCatalog;
use tracing::{debug, info};

const LOADING: &str = "Loading...";

enum MenuChoice {
    Search,
    Browse,
    Watched,
    Quit,
}

/// Interactive session: search, pick a movie, rate it, manage the watched list.
/// The watched list is dropped when the session ends.
pub async fn run_interactive(query: Option<String>, output: &Output) -> Result<()> {
    let (path_manager, config) = super::load_config()?;
    let catalog = super::open_catalog(&path_manager, &config)?;
    let mut session = Session::new(catalog, SessionOptions::from_config(&config.search));

    print_banner();

    if let Some(initial) = query.or_else(|| config.search.initial_query.clone()) {
        info!("Running initial query '{}'", initial);
        run_query(&mut session, initial, output).await;
    }

    loop {
        match main_menu(&session)? {
            MenuChoice::Search => {
                let current = session.state().query().to_string();
                let query = prompts::prompt_string("🔍 Search movies", Some(&current))?;
                run_query(&mut session, query, output).await;
            }
            MenuChoice::Browse => browse_results(&mut session, output).await?,
            MenuChoice::Watched => manage_watched(&mut session, output)?,
            MenuChoice::Quit => break,
        }
    }

    let summary = session.state().summary();
    info!("Session ended with {} watched movies", summary.count);
    Ok(())
}

fn print_banner() {
    println!();
    println!("{} {}", "🍿", "usePopcorn".bright_yellow().bold());
    println!();
}

fn main_menu<C: MovieCatalog + ?Sized + 'static>(session: &Session<C>) -> Result<MenuChoice> {
    let state = session.state();
    let items = vec![
        "🔍 Search movies".to_string(),
        format!("🎬 Browse results ({})", state.result_count()),
        format!("👀 Watched list ({})", state.watched().len()),
        "👋 Quit".to_string(),
    ];

    let choice = prompts::prompt_select("What next?", &items, 0)?;
    Ok(match choice {
        0 => MenuChoice::Search,
        1 => MenuChoice::Browse,
        2 => MenuChoice::Watched,
        _ => MenuChoice::Quit,
    })
}

/// Replace the query and show what the search brought back.
async fn run_query<C: MovieCatalog + ?Sized + 'static>(session: &mut Session<C>, query: String, output: &Output) {
    session.dispatch(Action::QueryChanged(query));
    wait_with_spinner(session, LOADING).await;

    let state = session.state();
    if state.query().chars().count() < state.min_query_len() {
        output.info(format!("Type at least {} characters to search.", state.min_query_len()));
        return;
    }

    if let Some(message) = state.search_error() {
        output.error(message);
        return;
    }

    if let Some(banner) = state.results_banner() {
        output.info(banner);
    }
    output.block(render::results_table(state.results(), state.selected_id()));
}

async fn browse_results<C: MovieCatalog + ?Sized + 'static>(session: &mut Session<C>, output: &Output) -> Result<()> {
    loop {
        let state = session.state();
        if state.results().is_empty() {
            output.info("No results to browse. Search for a movie first.");
            return Ok(());
        }

        let mut items: Vec<String> = state
            .results()
            .iter()
            .map(|result| {
                let marker = if state.is_watched(&result.imdb_id) { " 👀" } else { "" };
                format!("{} ({}){}", result.title, result.year, marker)
            })
            .collect();
        items.push("← Main menu".to_string());

        let choice = prompts::prompt_select("Pick a movie", &items, 0)?;
        let Some(imdb_id) = state.results().get(choice).map(|result| result.imdb_id.clone()) else {
            return Ok(());
        };

        debug!("Selected {}", imdb_id);
        session.dispatch(Action::Select(imdb_id));
        wait_with_spinner(session, LOADING).await;

        movie_details(session, output)?;
    }
}

/// Detail pane for the selected movie. Leaves with the selection cleared,
/// either by going back or by adding the movie to the watched list.
fn movie_details<C: MovieCatalog + ?Sized + 'static>(session: &mut Session<C>, output: &Output) -> Result<()> {
    // Nothing to show when the lookup failed; the failure is logged
    let Some(detail) = session.state().loaded_detail().cloned() else {
        session.dispatch(Action::Back);
        return Ok(());
    };

    let user_rating = session.state().watched().user_rating_for(&detail.imdb_id);
    output.block(render::detail_pane(&detail, user_rating));

    if user_rating.is_some() {
        prompts::prompt_select("Next", &["← Back"], 0)?;
        session.dispatch(Action::Back);
        return Ok(());
    }

    let choice = prompts::prompt_select("Next", &["⭐️ Rate and add to watched list", "← Back"], 0)?;
    if choice == 0 {
        let stars = prompts::prompt_stars("Your rating", output)?;
        match UserRating::new(stars) {
            Some(rating) => {
                session.dispatch(Action::AddWatched(WatchedEntry::from_detail(&detail, rating)));
                output.success(format!("Added {} to your watched list ({} ⭐️)", detail.title, rating));
                return Ok(());
            }
            None => output.info("Not rated, so not added."),
        }
    }

    session.dispatch(Action::Back);
    Ok(())
}

fn manage_watched<C: MovieCatalog + ?Sized + 'static>(session: &mut Session<C>, output: &Output) -> Result<()> {
    loop {
        let state = session.state();
        output.info(render::summary_line(&state.summary()));

        if state.watched().is_empty() {
            output.info("No watched movies yet.");
            return Ok(());
        }

        output.block(render::watched_table(state.watched()));

        let mut items: Vec<String> = state
            .watched()
            .iter()
            .map(|entry| {
                format!(
                    "❌ Remove {}",
                    render::watched_label(&entry.title, entry.imdb_rating, entry.user_rating, entry.runtime_minutes)
                )
            })
            .collect();
        items.push("← Main menu".to_string());

        let choice = prompts::prompt_select("Watched list", &items, items.len() - 1)?;
        let Some(entry) = state.watched().entries().get(choice) else {
            return Ok(());
        };
        let (imdb_id, title) = (entry.imdb_id.clone(), entry.title.clone());

        if prompts::prompt_yes_no(&format!("Remove {} from your watched list?", title), Some(true))? {
            session.dispatch(Action::RemoveWatched(imdb_id));
            output.success(format!("Removed {}", title));
        }
    }
}
