use serde::{Deserialize, Serialize};

/// Minimal movie summary returned by a text search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub imdb_id: String,
    pub title: String,
    pub poster_url: String,
    pub year: String, // Free text from the catalog, e.g. "2001" or "2001–2005"
}

/// Full metadata for a single movie, fetched by exact identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub poster_url: String,
    pub year: String,
    pub imdb_rating: String, // Kept as the catalog sends it ("7.8", "N/A")
    pub runtime_minutes: u32,
    pub country: String,
    pub language: String,
    pub plot: String,
    pub actors: String,
    pub director: String,
    pub writer: String,
    #[serde(default)]
    pub released: String,
    #[serde(default)]
    pub genre: String,
}

impl MovieDetail {
    /// Numeric view of the IMDb rating. Values the catalog marks as
    /// unavailable ("N/A") count as 0.0.
    pub fn imdb_rating_value(&self) -> f64 {
        self.imdb_rating.trim().parse::<f64>().unwrap_or(0.0)
    }
}

/// Parse a free-text runtime such as "142 min" into minutes.
///
/// Only the leading run of digits is used, so "90 min (approx.)" yields 90.
/// Anything without leading digits ("N/A", "") yields 0.
pub fn parse_runtime_minutes(runtime: &str) -> u32 {
    let digits: String = runtime
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
