pub mod request;
pub mod session;
pub mod state;
pub mod stats;
pub mod watched;

#[cfg(test)]
mod testing;

pub use request::{RequestSlot, RequestToken};
pub use session::{Session, SessionOptions};
pub use state::{
    transition, Action, DetailState, Effect, SearchStatus, SessionState, FETCH_FAILED_MESSAGE,
    NOT_FOUND_MESSAGE,
};
pub use stats::{average, format_rating, format_runtime, WatchedSummary};
pub use watched::WatchedList;
