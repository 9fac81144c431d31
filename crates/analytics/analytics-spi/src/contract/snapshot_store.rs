//! Optimizer snapshot persistence trait.

use crate::error::Result;
use crate::model::OptimizedPortfolioSnapshot;

/// Persistence for the latest optimizer snapshot of each portfolio.
///
/// `replace` must swap the stored snapshot atomically; concurrent writers
/// for one portfolio follow last-writer-wins.
pub trait SnapshotStore: Send + Sync {
    /// The stored snapshot for a portfolio, if any.
    fn load(&self, portfolio_id: &str) -> Result<Option<OptimizedPortfolioSnapshot>>;

    /// Replace the stored snapshot for a portfolio.
    fn replace(&self, portfolio_id: &str, snapshot: OptimizedPortfolioSnapshot) -> Result<()>;
}
