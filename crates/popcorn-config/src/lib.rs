pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, OmdbConfig, SearchConfig, DEFAULT_OMDB_BASE_URL, DEFAULT_MIN_QUERY_LEN};
pub use credentials::{CredentialStore, API_KEY_ENV};
pub use paths::{PathManager, container_base_path};
