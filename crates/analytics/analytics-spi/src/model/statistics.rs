//! Portfolio statistics model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Portfolio-level risk/return metrics derived from daily returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStatistics {
    /// Weighted mean daily return.
    pub expected_return: f64,
    /// Portfolio variance `wᵀ Σ w`.
    pub variance: f64,
    /// Square root of `variance`.
    pub volatility: f64,
    /// `expected_return / volatility` with a zero risk-free rate; 0 when volatility is 0.
    pub sharpe_ratio: f64,
    /// Raw sum of user-entered weights before normalization.
    pub weight_sum: f64,
    /// Number of aligned return observations used per holding.
    pub observation_count: usize,
    /// Mean daily return per symbol.
    pub mean_returns: BTreeMap<String, f64>,
    /// Weighted latest close; a diagnostic, not a monetary valuation.
    pub total_value: f64,
}
