//! Market comparison models.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Trailing company return set against tracked index returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketComparison {
    pub company_return: f64,
    /// Return per index that had enough history to compare.
    pub market_returns: BTreeMap<String, f64>,
    /// Indices the company beat.
    pub outperformers: BTreeSet<String>,
    /// Indices that beat the company.
    pub underperformers: BTreeSet<String>,
}

/// Index quote summary, supplied externally and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketIndexSummary {
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
}

/// Comparison plus the index summaries it was computed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub comparison: MarketComparison,
    pub indices: Vec<MarketIndexSummary>,
}
