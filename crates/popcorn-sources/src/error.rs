use thiserror::Error;

/// Errors a movie catalog lookup can end with.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The catalog answered `Response: "False"`.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The lookup task ended before the catalog answered.
    #[error("Lookup interrupted: {0}")]
    Interrupted(String),

    /// Missing API key or unusable base URL.
    #[error("Catalog not configured: {0}")]
    NotConfigured(String),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}
