//! Market index lookup trait.

use crate::error::Result;
use crate::model::{MarketIndexSummary, PriceObservation};

/// Provider of tracked market indices.
pub trait MarketIndexSource: Send + Sync {
    /// Source name, used in logs and error messages.
    fn name(&self) -> &str;

    /// Summaries of every tracked index.
    fn tracked_indices(&self) -> Result<Vec<MarketIndexSummary>>;

    /// Up to `window` trailing daily observations for an index.
    fn index_history(&self, symbol: &str, window: usize) -> Result<Vec<PriceObservation>>;
}
