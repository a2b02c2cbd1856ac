use popcorn_models::WatchedEntry;
use serde::Serialize;

/// The user's watched movies, in the order they were added.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WatchedList {
    entries: Vec<WatchedEntry>,
}

impl WatchedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. No duplicate check: adding a movie that is already
    /// present stores it twice.
    pub fn push(&mut self, entry: WatchedEntry) {
        self.entries.push(entry);
    }

    /// Remove every entry with the given id, keeping the rest in order.
    /// Returns how many entries were removed.
    pub fn remove(&mut self, imdb_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.imdb_id != imdb_id);
        before - self.entries.len()
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.imdb_id == imdb_id)
    }

    pub fn get(&self, imdb_id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|entry| entry.imdb_id == imdb_id)
    }

    /// Rating the user gave the movie, if it has been watched.
    pub fn user_rating_for(&self, imdb_id: &str) -> Option<u8> {
        self.get(imdb_id).map(|entry| entry.user_rating)
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WatchedEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
