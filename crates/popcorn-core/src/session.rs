use std::sync::Arc;
use std::time::Duration;

use popcorn_config::{SearchConfig, DEFAULT_MIN_QUERY_LEN};
use popcorn_sources::{CatalogError, MovieCatalog};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::request::RequestToken;
use crate::state::{transition, Action, Effect, SessionState};

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub min_query_len: usize,
    /// How long a search waits before hitting the catalog
    pub debounce: Duration,
}

impl SessionOptions {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            min_query_len: config.min_query_len,
            debounce: Duration::from_millis(config.debounce_ms),
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            debounce: Duration::ZERO,
        }
    }
}

/// Drives a [`SessionState`] against a movie catalog.
///
/// The session is the only owner of the state. Lookups run as tokio tasks
/// and report back over a channel; their results are applied on the next
/// call to [`Session::next_settlement`] or [`Session::wait_idle`]. Starting a
/// lookup aborts the previous task of the same kind.
pub struct Session<C: MovieCatalog + ?Sized + 'static> {
    catalog: Arc<C>,
    debounce: Duration,
    state: SessionState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Action>,
    search_task: Option<Lookup>,
    detail_task: Option<Lookup>,
}

/// A spawned lookup and the token its settlement will carry.
struct Lookup {
    token: RequestToken,
    handle: JoinHandle<()>,
}

impl<C: MovieCatalog + ?Sized + 'static> Session<C> {
    pub fn new(catalog: Arc<C>, options: SessionOptions) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        info!(
            "Starting session against {} (min query length {}, debounce {:?})",
            catalog.catalog_name(),
            options.min_query_len,
            options.debounce
        );
        Self {
            catalog,
            debounce: options.debounce,
            state: SessionState::new(options.min_query_len),
            tx,
            rx,
            search_task: None,
            detail_task: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Apply a user action and start whatever lookup it calls for.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        let (state, effect) = transition(state, action);
        self.state = state;

        if let Some(effect) = effect {
            self.run_effect(effect);
        }
    }

    /// Wait for one lookup to settle and apply it.
    ///
    /// Returns immediately when nothing is in flight. A lookup task that dies
    /// without reporting (panic, runtime shutdown) settles as an interrupted
    /// failure so the loading state still clears.
    pub async fn next_settlement(&mut self) {
        if !self.state.is_busy() {
            return;
        }

        let action = tokio::select! {
            action = self.rx.recv() => action,
            (token, reason) = lost_lookup(&mut self.search_task) => Some(Action::SearchSettled {
                token,
                outcome: Err(CatalogError::Interrupted(reason)),
            }),
            (token, reason) = lost_lookup(&mut self.detail_task) => Some(Action::DetailSettled {
                token,
                outcome: Err(CatalogError::Interrupted(reason)),
            }),
        };

        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    /// Apply settlements until no search or detail lookup is in flight.
    pub async fn wait_idle(&mut self) {
        while self.state.is_busy() {
            self.next_settlement().await;
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Search { token, query } => {
                abort_task(self.search_task.take());
                let catalog = Arc::clone(&self.catalog);
                let tx = self.tx.clone();
                let debounce = self.debounce;
                debug!("Dispatching search '{}' (token {})", query, token.value());
                let handle = tokio::spawn(async move {
                    if !debounce.is_zero() {
                        tokio::time::sleep(debounce).await;
                    }
                    let outcome = catalog.search(&query).await;
                    let _ = tx.send(Action::SearchSettled { token, outcome });
                });
                self.search_task = Some(Lookup { token, handle });
            }
            Effect::FetchDetail { token, imdb_id } => {
                abort_task(self.detail_task.take());
                let catalog = Arc::clone(&self.catalog);
                let tx = self.tx.clone();
                debug!("Dispatching detail lookup {} (token {})", imdb_id, token.value());
                let handle = tokio::spawn(async move {
                    let outcome = catalog.movie_details(&imdb_id).await;
                    let _ = tx.send(Action::DetailSettled { token, outcome });
                });
                self.detail_task = Some(Lookup { token, handle });
            }
            Effect::CancelSearch => abort_task(self.search_task.take()),
            Effect::CancelDetail => abort_task(self.detail_task.take()),
        }
    }
}

impl<C: MovieCatalog + ?Sized + 'static> Drop for Session<C> {
    fn drop(&mut self) {
        abort_task(self.search_task.take());
        abort_task(self.detail_task.take());
    }
}

fn abort_task(task: Option<Lookup>) {
    if let Some(task) = task {
        task.handle.abort();
    }
}

/// Resolves only when the lookup task ended without sending its settlement.
///
/// A task that finished normally has already queued its settlement on the
/// channel, so the slot is cleared and this never resolves.
async fn lost_lookup(task: &mut Option<Lookup>) -> (RequestToken, String) {
    let Some(lookup) = task.as_mut() else {
        return std::future::pending().await;
    };

    let joined = (&mut lookup.handle).await;
    let token = lookup.token;
    *task = None;

    match joined {
        Ok(()) => std::future::pending().await,
        Err(e) => {
            warn!("Lookup task (token {}) ended without a result: {}", token.value(), e);
            (token, e.to_string())
        }
    }
}
