use indicatif::{ProgressBar, ProgressStyle};
use popcorn_core::Session;
use popcorn_sources::MovieCatalog;
use std::io::IsTerminal;
use std::time::Duration;

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}

/// Spinner shown while a lookup is in flight; None when not on a terminal.
fn spinner(message: &str) -> Option<ProgressBar> {
    if !is_interactive() {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .map(|style| style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "))
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    Some(spinner)
}

/// Wait for the session's lookups to settle with a "Loading..." indicator.
pub async fn wait_with_spinner<C: MovieCatalog + ?Sized + 'static>(
    session: &mut Session<C>,
    message: &str,
) {
    if !session.state().is_busy() {
        return;
    }

    let spinner = spinner(message);
    session.wait_idle().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
}
