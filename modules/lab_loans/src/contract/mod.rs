//! Contract layer - public API of the lab loans module
//!
//! Transport-agnostic records, drafts, typed references and errors.
//! NO serde derives on models - these are pure domain types.

pub mod error;
pub mod model;
pub mod resource;

pub use error::LoansError;
pub use model::*;
pub use resource::{LinkedBy, Resource, Validate};
