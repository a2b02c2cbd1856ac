use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::movie::MovieDetail;
use crate::rating::UserRating;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    pub imdb_id: String,
    pub title: String,
    pub poster_url: String,
    pub year: String,
    pub imdb_rating: f64,
    pub runtime_minutes: u32,
    pub user_rating: u8, // 1-10, see UserRating
    pub date_added: DateTime<Utc>,
}

impl WatchedEntry {
    /// Build the entry the detail pane hands to "add to watched".
    pub fn from_detail(detail: &MovieDetail, rating: UserRating) -> Self {
        Self {
            imdb_id: detail.imdb_id.clone(),
            title: detail.title.clone(),
            poster_url: detail.poster_url.clone(),
            year: detail.year.clone(),
            imdb_rating: detail.imdb_rating_value(),
            runtime_minutes: detail.runtime_minutes,
            user_rating: rating.stars(),
            date_added: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_detail_copies_numbers() {
        let detail = MovieDetail {
            imdb_id: "tt1375666".to_string(),
            title: "Inception".to_string(),
            poster_url: "https://example.com/inception.jpg".to_string(),
            year: "2010".to_string(),
            imdb_rating: "8.8".to_string(),
            runtime_minutes: 148,
            country: "United States, United Kingdom".to_string(),
            language: "English, Japanese, French".to_string(),
            plot: String::new(),
            actors: String::new(),
            director: "Christopher Nolan".to_string(),
            writer: "Christopher Nolan".to_string(),
            released: "16 Jul 2010".to_string(),
            genre: "Action, Adventure, Sci-Fi".to_string(),
        };

        let entry = WatchedEntry::from_detail(&detail, UserRating::new(9).unwrap());
        assert_eq!(entry.imdb_id, "tt1375666");
        assert_eq!(entry.imdb_rating, 8.8);
        assert_eq!(entry.runtime_minutes, 148);
        assert_eq!(entry.user_rating, 9);
    }
}
