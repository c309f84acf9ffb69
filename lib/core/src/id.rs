//! Strongly-typed identifiers for backend entities.
//!
//! The backend assigns numeric (`Long`) identifiers. They travel as bare JSON
//! numbers, and display with a short prefix in logs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend identifier of a user account (admin, guide or visitor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates an ID from the backend's numeric value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric value used in API paths.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Returns the prefix used for display formatting.
    #[must_use]
    pub const fn prefix() -> &'static str {
        "usr"
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", Self::prefix(), self.0)
    }
}
