pub mod movie;
pub mod rating;
pub mod watched;

pub use movie::{parse_runtime_minutes, MovieDetail, SearchResult};
pub use rating::{UserRating, MAX_STARS};
pub use watched::WatchedEntry;
