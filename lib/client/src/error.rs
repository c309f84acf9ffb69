//! Error types for the client crate.

use std::fmt;

/// Errors from constructing an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The configured base URL is not an absolute http(s) URL.
    InvalidBaseUrl { url: String, reason: String },
    /// The underlying HTTP client could not be built.
    Build { details: String },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl { url, reason } => {
                write!(f, "invalid API base URL '{url}': {reason}")
            }
            Self::Build { details } => write!(f, "failed to build HTTP client: {details}"),
        }
    }
}

impl std::error::Error for ClientError {}
