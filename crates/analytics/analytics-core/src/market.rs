//! Relative performance against market indices.

use crate::returns::prepare_window;
use analytics_spi::{AnalyticsError, MarketComparison, PriceObservation, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// `(close_last - close_first) / close_first` over the trailing window.
///
/// `None` with fewer than two usable closes or a non-positive first close.
pub fn trailing_return(observations: &[PriceObservation], window: usize) -> Option<f64> {
    let prepared = prepare_window(observations, window);
    if prepared.len() < 2 {
        return None;
    }
    let first = prepared.first()?.close;
    let last = prepared.last()?.close;
    if first <= 0.0 {
        return None;
    }
    let r = (last - first) / first;
    r.is_finite().then_some(r)
}

/// Split indices into those the company beat and those that beat it.
///
/// Ties go to neither set.
pub fn classify(company_return: f64, market_returns: BTreeMap<String, f64>) -> MarketComparison {
    let mut outperformers = BTreeSet::new();
    let mut underperformers = BTreeSet::new();
    for (symbol, &index_return) in &market_returns {
        if company_return > index_return {
            outperformers.insert(symbol.clone());
        } else if index_return > company_return {
            underperformers.insert(symbol.clone());
        }
    }
    MarketComparison {
        company_return,
        market_returns,
        outperformers,
        underperformers,
    }
}

/// Compares a company's trailing return with each tracked index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketComparator {
    window: usize,
}

impl MarketComparator {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Compare the company against every index with enough history.
    ///
    /// Indices without two usable closes are left out; the company lacking
    /// them is an error.
    pub fn compare(
        &self,
        company: &[PriceObservation],
        indices: &HashMap<String, Vec<PriceObservation>>,
    ) -> Result<MarketComparison> {
        let company_return = trailing_return(company, self.window).ok_or_else(|| {
            AnalyticsError::insufficient(
                "company price history",
                2,
                prepare_window(company, self.window).len(),
            )
        })?;

        let mut market_returns = BTreeMap::new();
        for (symbol, history) in indices {
            match trailing_return(history, self.window) {
                Some(r) => {
                    market_returns.insert(symbol.clone(), r);
                }
                None => debug!(index = %symbol, "excluded from comparison: insufficient history"),
            }
        }

        Ok(classify(company_return, market_returns))
    }
}
