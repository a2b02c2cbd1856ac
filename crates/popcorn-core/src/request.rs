use serde::Serialize;

/// Identifies one dispatched lookup. Tokens from the same slot grow monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Single-slot "latest request" tracker.
///
/// Only the most recently issued token may settle; anything older is stale.
#[derive(Debug, Clone, Default)]
pub struct RequestSlot {
    issued: u64,
    current: Option<RequestToken>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token, superseding whatever was in flight.
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.current = Some(token);
        token
    }

    /// Accept a settlement. Returns false (and changes nothing) for stale tokens.
    pub fn settle(&mut self, token: RequestToken) -> bool {
        if self.current == Some(token) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Drop the in-flight token, if any. Returns whether one was dropped.
    pub fn invalidate(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn in_flight(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<RequestToken> {
        self.current
    }
}
