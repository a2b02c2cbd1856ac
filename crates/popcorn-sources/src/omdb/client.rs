use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use popcorn_config::OmdbConfig;
use popcorn_models::{MovieDetail, SearchResult};
use reqwest::Client;

use crate::error::CatalogError;
use crate::omdb::api;
use crate::traits::MovieCatalog;

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: String, config: &OmdbConfig) -> Result<Self, CatalogError> {
        if api_key.trim().is_empty() {
            return Err(CatalogError::NotConfigured(
                "OMDb API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MovieCatalog for OmdbClient {
    fn catalog_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, CatalogError> {
        api::search_movies(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn movie_details(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError> {
        api::get_movie(&self.client, &self.base_url, &self.api_key, imdb_id).await
    }
}
