//! Efficient frontier models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One sampled allocation's risk/return coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontierPoint {
    /// Portfolio volatility.
    pub risk: f64,
    /// Portfolio expected return.
    #[serde(rename = "return")]
    pub expected_return: f64,
    pub weights: BTreeMap<String, f64>,
}

impl FrontierPoint {
    /// Sharpe ratio of this point with a zero risk-free rate.
    pub fn sharpe_ratio(&self) -> f64 {
        if self.risk > 0.0 {
            self.expected_return / self.risk
        } else {
            0.0
        }
    }
}

/// Result of an explicit optimizer run, stored per portfolio.
///
/// A new run replaces the stored snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedPortfolioSnapshot {
    pub max_sharpe_weights: BTreeMap<String, f64>,
    pub min_variance_weights: BTreeMap<String, f64>,
    pub efficient_frontier: Vec<FrontierPoint>,
    pub calculated_at: DateTime<Utc>,
}
