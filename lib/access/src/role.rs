//! Portal roles.
//!
//! Every account has exactly one role, assigned by the backend at login.
//! The role decides which part of the portal the user lands on and which
//! routes they may open.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Park administrator: manages trails, schedules, guides and reservations.
    #[serde(rename = "ADMIN")]
    Admin,
    /// Trail guide: sees assignments and runs tours.
    #[serde(rename = "GUIA")]
    Guide,
    /// Visitor: books and manages their own reservations.
    #[serde(rename = "VISITANTE")]
    Visitor,
}

impl Role {
    /// All roles, in the order the backend documents them.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Guide, Role::Visitor];

    /// Returns the wire name of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Guide => "GUIA",
            Self::Visitor => "VISITANTE",
        }
    }

    /// Returns true if this role has admin privileges.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

// Lets a single role stand wherever a list of roles is accepted.
impl AsRef<[Role]> for Role {
    fn as_ref(&self) -> &[Role] {
        std::slice::from_ref(self)
    }
}
