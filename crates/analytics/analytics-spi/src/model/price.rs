//! Daily price observation model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One symbol's prices for one trading day.
///
/// Only `close` is required; the remaining fields are whatever the quote
/// provider supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub date: NaiveDate,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<u64>,
}

impl PriceObservation {
    /// Create an observation carrying only a closing price.
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }

    /// Create a full OHLCV observation.
    pub fn ohlcv(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close,
            volume: Some(volume),
        }
    }

    /// Whether the close can take part in a calculation.
    pub fn has_usable_close(&self) -> bool {
        self.close.is_finite()
    }
}

/// Extract closing prices from observations, in the given order.
pub fn closing_prices(observations: &[PriceObservation]) -> Vec<f64> {
    observations.iter().map(|o| o.close).collect()
}
