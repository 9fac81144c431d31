//! Portfolio Analytics Core
//!
//! Implementations for return series, portfolio statistics, Monte-Carlo
//! frontier sampling, trend and sentiment forecasts, and market comparison,
//! plus the `AnalyticsEngine` that wires them to collaborator sources.

pub mod calendar;
pub mod engine;
pub mod frontier;
pub mod market;
pub mod memory;
pub mod returns;
pub mod sentiment;
pub mod statistics;
pub mod trend;

pub use calendar::*;
pub use engine::*;
pub use frontier::*;
pub use market::*;
pub use memory::*;
pub use returns::*;
pub use sentiment::*;
pub use statistics::*;
pub use trend::*;
