use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResult};

use crate::error::CatalogError;

/// A movie database that can be searched by text and queried by id.
///
/// The session driver only talks to this trait, so tests can script
/// responses (and their timing) without a network.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Name used in logs.
    fn catalog_name(&self) -> &str;

    /// Search movies by free text.
    ///
    /// A query the catalog has no matches for is `Err(CatalogError::NotFound)`,
    /// not an empty list.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, CatalogError>;

    /// Fetch full metadata for one movie.
    async fn movie_details(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError>;
}
