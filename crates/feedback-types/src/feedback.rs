use std::{fmt, str::FromStr};

use garde::Validate;
use serde::{Deserialize, Serialize};

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_MESSAGE_LEN: usize = 5000;

/// Star rating, valid values are 1 to 5.
///
/// Deserialization accepts any `u8`, range is checked by validation, so that
/// out of range values can be reported as invalid input rather than as
/// malformed json.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Validate,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
#[garde(transparent)]
pub struct Rating(#[garde(range(min = 1, max = 5))] u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const DEFAULT: Rating = Rating(5);
    pub const ALL: [Rating; 5] = [Rating(1), Rating(2), Rating(3), Rating(4), Rating(5)];

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Rating must be between 1 and 5, got {0}")]
pub struct InvalidRating(pub String);

impl TryFrom<u8> for Rating {
    type Error = InvalidRating;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Rating::MIN..=Rating::MAX).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(InvalidRating(value.to_string()))
        }
    }
}

impl FromStr for Rating {
    type Err = InvalidRating;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidRating(s.trim().to_string());
        let value: u8 = s.trim().parse().map_err(|_| invalid())?;
        Rating::try_from(value).map_err(|_| invalid())
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One feedback entry as sent by the form and stored as a table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Submission {
    #[serde(default)]
    #[garde(length(chars, max = MAX_NAME_LEN))]
    pub name: String,
    #[garde(dive)]
    pub rating: Rating,
    #[garde(length(chars, min = 1, max = MAX_MESSAGE_LEN))]
    pub message: String,
}

impl Submission {
    pub fn new(name: impl Into<String>, rating: Rating, message: impl Into<String>) -> Self {
        Submission {
            name: name.into(),
            rating,
            message: message.into(),
        }
    }
}
