//! Error types for the access crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `ApiError`: Failures reported by the backend or the transport
//! - `StoreError`: Failures of the persisted credential store
//! - `SessionError`: Failures of session manager operations

use std::fmt;

/// Errors from calls to the external REST backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, timeout).
    Network { details: String },
    /// The backend rejected the payload (400, 422).
    Validation { message: String },
    /// The bearer token is missing, invalid or expired (401).
    Unauthorized,
    /// The authenticated user lacks permission (403).
    Forbidden,
    /// The requested resource does not exist (404).
    NotFound { message: String },
    /// The backend failed internally (5xx).
    Server { status: u16 },
    /// Any other non-success status.
    Rejected { status: u16, message: String },
    /// The response body could not be decoded.
    Decode { details: String },
}

impl ApiError {
    /// Returns true if the error means the stored credentials are no longer accepted.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns true if the backend never answered.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network { details } => write!(f, "network error: {details}"),
            Self::Validation { message } => write!(f, "validation failed: {message}"),
            Self::Unauthorized => write!(f, "session expired or credentials rejected"),
            Self::Forbidden => write!(f, "permission denied"),
            Self::NotFound { message } => write!(f, "not found: {message}"),
            Self::Server { status } => write!(f, "server error (status {status})"),
            Self::Rejected { status, message } => {
                write!(f, "request rejected with status {status}: {message}")
            }
            Self::Decode { details } => write!(f, "invalid response body: {details}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Errors from the persisted credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Reading the stored record failed.
    Read { details: String },
    /// Writing the record failed.
    Write { details: String },
    /// Removing the record failed.
    Clear { details: String },
    /// The stored record is not a valid credential record.
    Corrupt { details: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { details } => write!(f, "failed to read credentials: {details}"),
            Self::Write { details } => write!(f, "failed to write credentials: {details}"),
            Self::Clear { details } => write!(f, "failed to clear credentials: {details}"),
            Self::Corrupt { details } => write!(f, "stored credentials are corrupt: {details}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors from session manager operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The backend call behind the operation failed.
    Api(ApiError),
    /// The session could not be persisted.
    Store(StoreError),
    /// The operation needs a logged-in user.
    NotAuthenticated,
}

impl SessionError {
    /// Returns the backend error, if this failure came from the API.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NotAuthenticated => write!(f, "no user is logged in"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<ApiError> for SessionError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_carries_backend_message() {
        let err = ApiError::Validation {
            message: "El email es obligatorio".to_string(),
        };
        assert!(err.to_string().contains("El email es obligatorio"));
    }

    #[test]
    fn rejected_error_display() {
        let err = ApiError::Rejected {
            status: 409,
            message: "duplicate".to_string(),
        };
        assert!(err.to_string().contains("409"));
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn unauthorized_classification() {
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(!ApiError::Forbidden.is_unauthorized());
        assert!(
            ApiError::Network {
                details: "timeout".to_string()
            }
            .is_network()
        );
    }

    #[test]
    fn store_error_display() {
        let err = StoreError::Corrupt {
            details: "expected value at line 1".to_string(),
        };
        assert!(err.to_string().contains("corrupt"));
    }

    #[test]
    fn session_error_exposes_api_error() {
        let err = SessionError::from(ApiError::Unauthorized);
        assert_eq!(err.api_error(), Some(&ApiError::Unauthorized));
        assert!(SessionError::NotAuthenticated.api_error().is_none());
    }
}
