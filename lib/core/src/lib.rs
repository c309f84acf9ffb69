//! Core domain types shared by the parque-senderos crates.
//!
//! Error types live with the crate that raises them; this crate only holds
//! identifiers that cross crate boundaries.

pub mod id;

pub use id::UserId;
