//! Portfolio Analytics Service Provider Interface
//!
//! Defines the data model, error type and collaborator contracts for the
//! portfolio analytics engine: price history and news lookups, market index
//! lookups, and the optimizer snapshot store.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::*;
pub use error::*;
pub use model::*;
