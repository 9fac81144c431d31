//! Portfolio Analytics Facade
//!
//! Unified re-exports for the analytics module.
//!
//! This facade provides access to all analytics components:
//! - `returns` - Trailing windows and simple return series (ReturnsCalculator)
//! - `statistics` - Portfolio risk/return metrics (StatisticsCalculator)
//! - `frontier` - Monte-Carlo efficient frontier (FrontierOptimizer)
//! - `trend` / `sentiment` - Linear trend and sentiment-adjusted forecasts
//! - `market` - Relative performance against market indices
//! - `engine` - `AnalyticsEngine` over pluggable price, news, index and snapshot sources

// Re-export everything from SPI (traits, errors, types)
pub use analytics_spi::*;

// Re-export everything from API (configs)
pub use analytics_api::*;

// Re-export everything from Core (implementations)
pub use analytics_core::*;
