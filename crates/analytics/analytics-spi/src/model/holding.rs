//! Portfolio holding model.

use serde::{Deserialize, Serialize};

/// A symbol held in a portfolio with a user-entered weight.
///
/// Weights need not sum to 1 across a portfolio; the engine normalizes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub weight: f64,
}

impl Holding {
    pub fn new(symbol: impl Into<String>, weight: f64) -> Self {
        Self {
            symbol: symbol.into(),
            weight,
        }
    }
}
