//! Price history lookup trait.

use crate::error::Result;
use crate::model::PriceObservation;

/// Provider of daily price history.
///
/// Implementations may return observations newest-first or oldest-first;
/// the engine re-orders them before any calculation.
pub trait PriceHistorySource: Send + Sync {
    /// Source name, used in logs and error messages.
    fn name(&self) -> &str;

    /// Fetch up to `window` trailing daily observations for `symbol`.
    fn price_history(&self, symbol: &str, window: usize) -> Result<Vec<PriceObservation>>;
}
