//! Session management and route authorization for the parque-senderos portal.
//!
//! This crate provides:
//! - Portal roles (`Role`) and the session user record (`SessionUser`)
//! - The persisted credential store (`CredentialStore`, `CredentialRecord`)
//! - The session manager (`SessionManager`) with best-effort profile enrichment
//! - Route guards (`PublicRouteGuard`, `RoleRouteGuard`) and the portal route table
//!
//! # Example
//!
//! ```
//! use parque_access::{
//!     CredentialRecord, GateDecision, Role, RoleRouteGuard, RouteGuard, SessionState,
//!     SessionUser,
//! };
//! use parque_core::UserId;
//!
//! let guide = SessionUser {
//!     id: UserId::new(7),
//!     first_name: "Luis".to_string(),
//!     last_name: "Páez".to_string(),
//!     email: "luis@parque.co".to_string(),
//!     role: Role::Guide,
//!     phone: None,
//!     national_id: None,
//!     registered_at: None,
//!     status: None,
//! };
//! let state = SessionState::signed_in(CredentialRecord::new("jwt", guide));
//!
//! let admin_only = RoleRouteGuard::roles([Role::Admin]);
//! assert_eq!(admin_only.evaluate(&state), GateDecision::RedirectUnauthorized);
//! assert!(state.has_role(Role::Guide));
//! ```

pub mod api;
pub mod enrich;
pub mod error;
pub mod gate;
pub mod manager;
pub mod role;
pub mod routes;
pub mod store;
pub mod user;

// Re-export main types at crate root
pub use api::{AuthApi, AuthResponse, Credentials, ProfileApi, TokenVerification, VisitorRegistration};
pub use error::{ApiError, SessionError, StoreError};
pub use gate::{GateDecision, PublicRouteGuard, RoleRouteGuard, RouteGuard, paths};
pub use manager::{SessionManager, SessionOptions, SessionState};
pub use role::{Role, UnknownRole};
pub use routes::{Access, Navigation, RouteEntry, RouteTable};
#[cfg(not(target_arch = "wasm32"))]
pub use store::FileCredentialStore;
pub use store::{CredentialRecord, CredentialStore, MemoryCredentialStore};
pub use user::{ProfileRecord, ProfileUpdate, SessionUser};
