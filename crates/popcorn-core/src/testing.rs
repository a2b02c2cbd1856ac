//! Scripted movie catalog for session tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResult};
use popcorn_sources::{CatalogError, MovieCatalog};
use tokio::sync::Notify;

/// What the catalog answers for one query or id.
#[derive(Debug, Clone)]
pub enum Reply {
    Results(Vec<SearchResult>),
    Detail(MovieDetail),
    NotFound,
    ServerError,
    /// The catalog call panics instead of answering
    Panic,
}

#[derive(Clone)]
struct Scripted {
    reply: Reply,
    /// Held until the test releases it
    gate: Option<Arc<Notify>>,
}

/// Catalog whose answers (and their timing) are set up by the test.
///
/// Anything not scripted answers `NotFound`.
#[derive(Default)]
pub struct ScriptedCatalog {
    searches: Mutex<HashMap<String, Scripted>>,
    details: Mutex<HashMap<String, Scripted>>,
    search_calls: Mutex<Vec<String>>,
    detail_calls: Mutex<Vec<String>>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_search(&self, query: &str, reply: Reply) {
        self.searches
            .lock()
            .unwrap()
            .insert(query.to_string(), Scripted { reply, gate: None });
    }

    /// Script a search that only answers after `notify_one` on the returned gate.
    pub fn script_gated_search(&self, query: &str, reply: Reply) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.searches.lock().unwrap().insert(
            query.to_string(),
            Scripted { reply, gate: Some(Arc::clone(&gate)) },
        );
        gate
    }

    pub fn script_detail(&self, imdb_id: &str, reply: Reply) {
        self.details
            .lock()
            .unwrap()
            .insert(imdb_id.to_string(), Scripted { reply, gate: None });
    }

    pub fn script_gated_detail(&self, imdb_id: &str, reply: Reply) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.details.lock().unwrap().insert(
            imdb_id.to_string(),
            Scripted { reply, gate: Some(Arc::clone(&gate)) },
        );
        gate
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }

    async fn answer(scripted: Option<Scripted>) -> Reply {
        match scripted {
            Some(Scripted { reply, gate }) => {
                if let Some(gate) = gate {
                    gate.notified().await;
                }
                if let Reply::Panic = reply {
                    panic!("scripted catalog panic");
                }
                reply
            }
            None => Reply::NotFound,
        }
    }
}

fn reply_error(reply: Reply) -> CatalogError {
    match reply {
        Reply::NotFound => CatalogError::NotFound("Movie not found!".to_string()),
        Reply::ServerError => CatalogError::Api {
            status: 500,
            message: "scripted failure".to_string(),
        },
        other => CatalogError::Parse(format!("wrong reply kind scripted: {:?}", other)),
    }
}

#[async_trait]
impl MovieCatalog for ScriptedCatalog {
    fn catalog_name(&self) -> &str {
        "scripted"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, CatalogError> {
        self.search_calls.lock().unwrap().push(query.to_string());
        let scripted = self.searches.lock().unwrap().get(query).cloned();
        match Self::answer(scripted).await {
            Reply::Results(results) => Ok(results),
            other => Err(reply_error(other)),
        }
    }

    async fn movie_details(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError> {
        self.detail_calls.lock().unwrap().push(imdb_id.to_string());
        let scripted = self.details.lock().unwrap().get(imdb_id).cloned();
        match Self::answer(scripted).await {
            Reply::Detail(detail) => Ok(detail),
            other => Err(reply_error(other)),
        }
    }
}

pub mod fixtures {
    use popcorn_models::{MovieDetail, SearchResult};

    pub fn search_result(imdb_id: &str, title: &str) -> SearchResult {
        SearchResult {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            poster_url: "N/A".to_string(),
            year: "1999".to_string(),
        }
    }

    pub fn movie_detail(imdb_id: &str, imdb_rating: &str, runtime_minutes: u32) -> MovieDetail {
        MovieDetail {
            imdb_id: imdb_id.to_string(),
            title: format!("Movie {}", imdb_id),
            poster_url: "N/A".to_string(),
            year: "1999".to_string(),
            imdb_rating: imdb_rating.to_string(),
            runtime_minutes,
            country: "United States".to_string(),
            language: "English".to_string(),
            plot: "A test plot.".to_string(),
            actors: "Someone".to_string(),
            director: "Someone Else".to_string(),
            writer: "A Writer".to_string(),
            released: "01 Jan 1999".to_string(),
            genre: "Drama".to_string(),
        }
    }
}
