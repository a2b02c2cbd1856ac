//! OMDb (Open Movie Database) API client.
//!
//! OMDb needs an API key on every request. A single endpoint serves both
//! text search (`s=`) and lookup by IMDb id (`i=`).

pub mod api;
pub mod client;

pub use client::OmdbClient;
