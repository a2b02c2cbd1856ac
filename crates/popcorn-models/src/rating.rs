use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest value of the star input.
pub const MAX_STARS: u8 = 10;

/// A rating the user gave a movie, 1-10 stars.
///
/// The star input itself ranges over 0..=10 where 0 means "not rated yet";
/// only a non-zero value can become a `UserRating`, which is what gates the
/// "add to watched" action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct UserRating(u8);

impl UserRating {
    pub fn new(stars: u8) -> Option<Self> {
        if (1..=MAX_STARS).contains(&stars) {
            Some(Self(stars))
        } else {
            None
        }
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for UserRating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("rating must be between 1 and {}, got {}", MAX_STARS, value))
    }
}

impl From<UserRating> for u8 {
    fn from(rating: UserRating) -> Self {
        rating.0
    }
}

impl fmt::Display for UserRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
