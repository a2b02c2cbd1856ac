pub mod error;
pub mod omdb;
pub mod traits;

pub use error::CatalogError;
pub use omdb::OmdbClient;
pub use traits::MovieCatalog;
