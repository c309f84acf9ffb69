//! HTTP access to the park backend.
//!
//! [`ApiClient`] is the production implementation of the access crate's
//! `AuthApi` and `ProfileApi` traits.

pub mod client;
pub mod config;
pub mod error;

pub use client::{Acknowledgement, ApiClient, GuideRegistration};
pub use config::ClientConfig;
pub use error::ClientError;
