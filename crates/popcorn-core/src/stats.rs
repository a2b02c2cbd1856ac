use popcorn_models::WatchedEntry;
use serde::Serialize;

/// Arithmetic mean computed as a running sum of `x / len`.
///
/// An empty slice never divides and yields 0.0.
pub fn average(values: &[f64]) -> f64 {
    let len = values.len() as f64;
    values.iter().fold(0.0, |acc, value| acc + value / len)
}

/// Aggregates shown above the watched list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}

impl WatchedSummary {
    pub fn from_entries(entries: &[WatchedEntry]) -> Self {
        let imdb: Vec<f64> = entries.iter().map(|e| e.imdb_rating).collect();
        let user: Vec<f64> = entries.iter().map(|e| f64::from(e.user_rating)).collect();
        let runtime: Vec<f64> = entries.iter().map(|e| f64::from(e.runtime_minutes)).collect();

        Self {
            count: entries.len(),
            avg_imdb_rating: average(&imdb),
            avg_user_rating: average(&user),
            avg_runtime: average(&runtime),
        }
    }

    pub fn imdb_rating_display(&self) -> String {
        format_rating(self.avg_imdb_rating)
    }

    pub fn user_rating_display(&self) -> String {
        format_rating(self.avg_user_rating)
    }

    pub fn runtime_display(&self) -> String {
        format_runtime(self.avg_runtime)
    }
}

/// Ratings are shown with one decimal.
pub fn format_rating(value: f64) -> String {
    format!("{:.1}", value)
}

/// Runtimes are shown as whole minutes.
pub fn format_runtime(minutes: f64) -> String {
    format!("{} min", minutes.round() as u64)
}
