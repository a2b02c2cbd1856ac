//! Session state and its transition function.
//!
//! Every user event and every settled lookup is an [`Action`]. [`transition`]
//! takes the old state by value and returns the new state plus at most one
//! [`Effect`] for the driver to carry out. Nothing here touches the network.

use popcorn_config::DEFAULT_MIN_QUERY_LEN;
use popcorn_models::{MovieDetail, SearchResult, WatchedEntry};
use popcorn_sources::CatalogError;
use tracing::{debug, warn};

use crate::request::{RequestSlot, RequestToken};
use crate::stats::WatchedSummary;
use crate::watched::WatchedList;

/// Shown when the catalog has no match for the query.
pub const NOT_FOUND_MESSAGE: &str = "Movie Not Found";
/// Shown for transport failures and non-success responses.
pub const FETCH_FAILED_MESSAGE: &str = "Something went wrong while fetching movies";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    /// Nothing selected
    Empty,
    Loading,
    Loaded(MovieDetail),
    /// The lookup failed; the pane stays blank
    Unavailable,
}

#[derive(Debug)]
pub enum Action {
    QueryChanged(String),
    SearchSettled {
        token: RequestToken,
        outcome: Result<Vec<SearchResult>, CatalogError>,
    },
    /// Toggle the selection: selecting the selected id clears it.
    Select(String),
    Back,
    DetailSettled {
        token: RequestToken,
        outcome: Result<MovieDetail, CatalogError>,
    },
    AddWatched(WatchedEntry),
    RemoveWatched(String),
}

/// Work the driver performs after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Search { token: RequestToken, query: String },
    FetchDetail { token: RequestToken, imdb_id: String },
    CancelSearch,
    CancelDetail,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    query: String,
    min_query_len: usize,
    results: Vec<SearchResult>,
    search_status: SearchStatus,
    search_slot: RequestSlot,
    selected_id: Option<String>,
    detail: DetailState,
    detail_slot: RequestSlot,
    watched: WatchedList,
}

impl SessionState {
    pub fn new(min_query_len: usize) -> Self {
        Self {
            query: String::new(),
            min_query_len,
            results: Vec::new(),
            search_status: SearchStatus::Idle,
            search_slot: RequestSlot::new(),
            selected_id: None,
            detail: DetailState::Empty,
            detail_slot: RequestSlot::new(),
            watched: WatchedList::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// "Found N results", only shown for more than one result.
    pub fn results_banner(&self) -> Option<String> {
        if self.results.len() > 1 {
            Some(format!("Found {} results", self.results.len()))
        } else {
            None
        }
    }

    pub fn search_status(&self) -> &SearchStatus {
        &self.search_status
    }

    pub fn is_searching(&self) -> bool {
        self.search_status == SearchStatus::Loading
    }

    pub fn search_error(&self) -> Option<&str> {
        match &self.search_status {
            SearchStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn loaded_detail(&self) -> Option<&MovieDetail> {
        match &self.detail {
            DetailState::Loaded(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn is_detail_loading(&self) -> bool {
        self.detail == DetailState::Loading
    }

    pub fn watched(&self) -> &WatchedList {
        &self.watched
    }

    pub fn is_watched(&self, imdb_id: &str) -> bool {
        self.watched.contains(imdb_id)
    }

    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary::from_entries(self.watched.entries())
    }

    /// True while a search or detail lookup is waiting to settle.
    pub fn is_busy(&self) -> bool {
        self.search_slot.in_flight() || self.detail_slot.in_flight()
    }

    fn clear_selection(&mut self) -> Option<Effect> {
        self.selected_id = None;
        self.detail = DetailState::Empty;
        if self.detail_slot.invalidate() {
            Some(Effect::CancelDetail)
        } else {
            None
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_QUERY_LEN)
    }
}

pub fn transition(mut state: SessionState, action: Action) -> (SessionState, Option<Effect>) {
    let effect = match action {
        Action::QueryChanged(query) => {
            state.query = query;
            if state.query.chars().count() < state.min_query_len {
                state.results.clear();
                state.search_status = SearchStatus::Idle;
                if state.search_slot.invalidate() {
                    Some(Effect::CancelSearch)
                } else {
                    None
                }
            } else {
                state.search_status = SearchStatus::Loading;
                let token = state.search_slot.issue();
                Some(Effect::Search {
                    token,
                    query: state.query.clone(),
                })
            }
        }
        Action::SearchSettled { token, outcome } => {
            if !state.search_slot.settle(token) {
                debug!("Dropping stale search response (token {})", token.value());
                return (state, None);
            }
            match outcome {
                Ok(results) => {
                    debug!("Search '{}' settled with {} results", state.query, results.len());
                    state.results = results;
                    state.search_status = SearchStatus::Idle;
                }
                Err(CatalogError::NotFound(reason)) => {
                    debug!("Search '{}' found nothing: {}", state.query, reason);
                    state.results.clear();
                    state.search_status = SearchStatus::Failed(NOT_FOUND_MESSAGE.to_string());
                }
                Err(e) => {
                    warn!("Search '{}' failed: {}", state.query, e);
                    state.results.clear();
                    state.search_status = SearchStatus::Failed(FETCH_FAILED_MESSAGE.to_string());
                }
            }
            None
        }
        Action::Select(imdb_id) => {
            if state.selected_id.as_deref() == Some(imdb_id.as_str()) {
                state.clear_selection()
            } else {
                let token = state.detail_slot.issue();
                state.selected_id = Some(imdb_id.clone());
                state.detail = DetailState::Loading;
                Some(Effect::FetchDetail { token, imdb_id })
            }
        }
        Action::Back => state.clear_selection(),
        Action::DetailSettled { token, outcome } => {
            if !state.detail_slot.settle(token) {
                debug!("Dropping stale detail response (token {})", token.value());
                return (state, None);
            }
            state.detail = match outcome {
                Ok(detail) => DetailState::Loaded(detail),
                Err(e) => {
                    warn!(
                        "Detail lookup for {} failed: {}",
                        state.selected_id.as_deref().unwrap_or("?"),
                        e
                    );
                    DetailState::Unavailable
                }
            };
            None
        }
        Action::AddWatched(entry) => {
            debug!("Adding {} to watched list", entry.imdb_id);
            state.watched.push(entry);
            state.clear_selection()
        }
        Action::RemoveWatched(imdb_id) => {
            let removed = state.watched.remove(&imdb_id);
            debug!("Removed {} watched entries for {}", removed, imdb_id);
            None
        }
    };

    (state, effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use popcorn_models::UserRating;

    fn result(imdb_id: &str, title: &str) -> SearchResult {
        SearchResult {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            poster_url: "N/A".to_string(),
            year: "2001".to_string(),
        }
    }

    fn detail(imdb_id: &str) -> MovieDetail {
        MovieDetail {
            imdb_id: imdb_id.to_string(),
            title: "Amélie".to_string(),
            poster_url: String::new(),
            year: "2001".to_string(),
            imdb_rating: "8.0".to_string(),
            runtime_minutes: 120,
            country: "France".to_string(),
            language: "French".to_string(),
            plot: String::new(),
            actors: String::new(),
            director: "Jean-Pierre Jeunet".to_string(),
            writer: String::new(),
            released: String::new(),
            genre: String::new(),
        }
    }

    fn search_token(effect: Option<Effect>) -> RequestToken {
        match effect {
            Some(Effect::Search { token, .. }) => token,
            other => panic!("expected a search effect, got {:?}", other),
        }
    }

    fn detail_token(effect: Option<Effect>) -> RequestToken {
        match effect {
            Some(Effect::FetchDetail { token, .. }) => token,
            other => panic!("expected a detail effect, got {:?}", other),
        }
    }

    #[test]
    fn test_short_query_clears_without_request() {
        for query in ["", "a", "é"] {
            let (state, effect) = transition(SessionState::default(), Action::QueryChanged(query.to_string()));
            assert_eq!(effect, None);
            assert!(state.results().is_empty());
            assert_eq!(state.search_status(), &SearchStatus::Idle);
        }
    }

    #[test]
    fn test_short_query_cancels_in_flight_search() {
        let (state, effect) = transition(SessionState::default(), Action::QueryChanged("matrix".to_string()));
        let token = search_token(effect);

        let (state, effect) = transition(state, Action::QueryChanged("m".to_string()));
        assert_eq!(effect, Some(Effect::CancelSearch));
        assert!(!state.is_searching());

        let (state, _) = transition(
            state,
            Action::SearchSettled { token, outcome: Ok(vec![result("tt0133093", "The Matrix")]) },
        );
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_search_success_replaces_results() {
        let (state, effect) = transition(SessionState::default(), Action::QueryChanged("fast".to_string()));
        assert!(state.is_searching());
        let token = search_token(effect);

        let results = vec![result("tt1", "Fast Five"), result("tt2", "Fast X"), result("tt3", "Fast & Furious")];
        let (state, effect) = transition(state, Action::SearchSettled { token, outcome: Ok(results) });
        assert_eq!(effect, None);
        assert!(!state.is_searching());
        assert_eq!(state.result_count(), 3);
        assert_eq!(state.results_banner().as_deref(), Some("Found 3 results"));
        assert_eq!(state.search_error(), None);
    }

    #[test]
    fn test_single_result_has_no_banner() {
        let (state, effect) = transition(SessionState::default(), Action::QueryChanged("amelie".to_string()));
        let token = search_token(effect);
        let (state, _) = transition(state, Action::SearchSettled { token, outcome: Ok(vec![result("tt1", "Amélie")]) });
        assert_eq!(state.result_count(), 1);
        assert_eq!(state.results_banner(), None);
    }

    #[test]
    fn test_not_found_scenario() {
        let (state, effect) = transition(SessionState::default(), Action::QueryChanged("in".to_string()));
        let token = search_token(effect);

        let (state, _) = transition(
            state,
            Action::SearchSettled {
                token,
                outcome: Err(CatalogError::NotFound("Movie not found!".to_string())),
            },
        );
        assert_eq!(state.search_error(), Some(NOT_FOUND_MESSAGE));
        assert!(state.results().is_empty());
        assert!(!state.is_searching());
    }

    #[test]
    fn test_transport_failure_shows_generic_message() {
        let (state, effect) = transition(SessionState::default(), Action::QueryChanged("alien".to_string()));
        let token = search_token(effect);

        let (state, _) = transition(
            state,
            Action::SearchSettled {
                token,
                outcome: Err(CatalogError::Api { status: 503, message: "unavailable".to_string() }),
            },
        );
        assert_eq!(state.search_error(), Some(FETCH_FAILED_MESSAGE));
        assert!(!state.is_searching());
    }

    #[test]
    fn test_new_query_clears_previous_error() {
        let (state, effect) = transition(SessionState::default(), Action::QueryChanged("zz".to_string()));
        let token = search_token(effect);
        let (state, _) = transition(
            state,
            Action::SearchSettled { token, outcome: Err(CatalogError::NotFound(String::new())) },
        );
        assert!(state.search_error().is_some());

        let (state, _) = transition(state, Action::QueryChanged("zzz".to_string()));
        assert_eq!(state.search_error(), None);
        assert!(state.is_searching());
    }

    #[test]
    fn test_stale_search_response_is_ignored() {
        let (state, first) = transition(SessionState::default(), Action::QueryChanged("star".to_string()));
        let stale = search_token(first);
        let (state, second) = transition(state, Action::QueryChanged("star wars".to_string()));
        let current = search_token(second);

        let (state, _) = transition(
            state,
            Action::SearchSettled { token: stale, outcome: Ok(vec![result("tt9", "Star Trek")]) },
        );
        assert!(state.results().is_empty());
        assert!(state.is_searching());

        let (state, _) = transition(
            state,
            Action::SearchSettled { token: current, outcome: Ok(vec![result("tt0076759", "Star Wars")]) },
        );
        assert_eq!(state.results()[0].title, "Star Wars");
        assert!(!state.is_busy());
    }

    #[test]
    fn test_select_twice_toggles_off() {
        let (state, effect) = transition(SessionState::default(), Action::Select("tt0211915".to_string()));
        assert_eq!(state.selected_id(), Some("tt0211915"));
        assert!(state.is_detail_loading());
        detail_token(effect);

        let (state, effect) = transition(state, Action::Select("tt0211915".to_string()));
        assert_eq!(state.selected_id(), None);
        assert_eq!(state.detail(), &DetailState::Empty);
        assert_eq!(effect, Some(Effect::CancelDetail));
    }

    #[test]
    fn test_detail_settles_into_pane() {
        let (state, effect) = transition(SessionState::default(), Action::Select("tt0211915".to_string()));
        let token = detail_token(effect);

        let (state, _) = transition(state, Action::DetailSettled { token, outcome: Ok(detail("tt0211915")) });
        assert_eq!(state.loaded_detail().map(|d| d.title.as_str()), Some("Amélie"));
        assert!(!state.is_busy());
    }

    #[test]
    fn test_detail_failure_clears_loading() {
        let (state, effect) = transition(SessionState::default(), Action::Select("tt0211915".to_string()));
        let token = detail_token(effect);

        let (state, _) = transition(
            state,
            Action::DetailSettled { token, outcome: Err(CatalogError::Parse("bad".to_string())) },
        );
        assert_eq!(state.detail(), &DetailState::Unavailable);
        assert_eq!(state.selected_id(), Some("tt0211915"));
    }

    #[test]
    fn test_stale_detail_after_switching_selection() {
        let (state, effect) = transition(SessionState::default(), Action::Select("tt1".to_string()));
        let stale = detail_token(effect);
        let (state, effect) = transition(state, Action::Select("tt2".to_string()));
        let current = detail_token(effect);

        let (state, _) = transition(state, Action::DetailSettled { token: stale, outcome: Ok(detail("tt1")) });
        assert!(state.is_detail_loading());

        let (state, _) = transition(state, Action::DetailSettled { token: current, outcome: Ok(detail("tt2")) });
        assert_eq!(state.loaded_detail().map(|d| d.imdb_id.as_str()), Some("tt2"));
    }

    #[test]
    fn test_back_drops_pending_detail() {
        let (state, effect) = transition(SessionState::default(), Action::Select("tt1".to_string()));
        let token = detail_token(effect);

        let (state, effect) = transition(state, Action::Back);
        assert_eq!(effect, Some(Effect::CancelDetail));

        let (state, _) = transition(state, Action::DetailSettled { token, outcome: Ok(detail("tt1")) });
        assert_eq!(state.detail(), &DetailState::Empty);
        assert_eq!(state.selected_id(), None);
    }

    #[test]
    fn test_add_watched_updates_summary_and_clears_selection() {
        let (state, effect) = transition(SessionState::default(), Action::Select("tt0211915".to_string()));
        let token = detail_token(effect);
        let (state, _) = transition(state, Action::DetailSettled { token, outcome: Ok(detail("tt0211915")) });

        let entry = WatchedEntry::from_detail(state.loaded_detail().unwrap(), UserRating::new(9).unwrap());
        let (state, effect) = transition(state, Action::AddWatched(entry));
        assert_eq!(effect, None);
        assert_eq!(state.selected_id(), None);
        assert!(state.is_watched("tt0211915"));

        let summary = state.summary();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.avg_imdb_rating, 8.0);
        assert_eq!(summary.avg_user_rating, 9.0);
        assert_eq!(summary.avg_runtime, 120.0);
    }

    #[test]
    fn test_remove_watched_keeps_order() {
        let mut state = SessionState::default();
        for id in ["tt1", "tt2", "tt3"] {
            let entry = WatchedEntry {
                imdb_id: id.to_string(),
                title: id.to_string(),
                poster_url: String::new(),
                year: "1999".to_string(),
                imdb_rating: 7.0,
                runtime_minutes: 90,
                user_rating: 6,
                date_added: Utc::now(),
            };
            state = transition(state, Action::AddWatched(entry)).0;
        }

        let (state, _) = transition(state, Action::RemoveWatched("tt2".to_string()));
        let ids: Vec<&str> = state.watched().iter().map(|e| e.imdb_id.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt3"]);
    }

    #[test]
    fn test_custom_min_query_len() {
        let (_, effect) = transition(SessionState::new(4), Action::QueryChanged("abc".to_string()));
        assert_eq!(effect, None);
        let (_, effect) = transition(SessionState::new(4), Action::QueryChanged("abcd".to_string()));
        assert!(matches!(effect, Some(Effect::Search { .. })));
    }
}
