//! Shared types and models for the Travel Timing Recommendation Platform
//!
//! This crate contains value types shared between the scoring backend and
//! the external collaborators of the system (catalog, persistence,
//! presentation).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
