//! Return series calculation.
//!
//! Turns raw daily observations into a chronologically ascending trailing
//! window and then into simple day-over-day returns.

use analytics_spi::{closing_prices, PriceObservation};
use chrono::NaiveDate;
use tracing::debug;

/// Order observations for calculation.
///
/// Sorts ascending by date, collapses duplicate dates (the last occurrence
/// wins), drops observations whose close is not finite, and keeps the
/// trailing `window` observations.
pub fn prepare_window(observations: &[PriceObservation], window: usize) -> Vec<PriceObservation> {
    let mut sorted: Vec<PriceObservation> = observations
        .iter()
        .filter(|o| o.has_usable_close())
        .cloned()
        .collect();

    let dropped = observations.len() - sorted.len();
    if dropped > 0 {
        debug!(dropped, "dropped observations with non-finite close");
    }

    // Stable sort keeps input order among equal dates.
    sorted.sort_by_key(|o| o.date);

    let mut window_obs: Vec<PriceObservation> = Vec::with_capacity(sorted.len());
    for obs in sorted {
        match window_obs.last_mut() {
            Some(last) if last.date == obs.date => *last = obs,
            _ => window_obs.push(obs),
        }
    }

    if window_obs.len() > window {
        window_obs.drain(..window_obs.len() - window);
    }
    window_obs
}

/// Calendar span of one return: the dates of the prior and the current close.
pub type ReturnPeriod = (NaiveDate, NaiveDate);

fn simple_return(prev: f64, cur: f64) -> Option<f64> {
    if !(prev.is_finite() && prev > 0.0 && cur.is_finite()) {
        return None;
    }
    let r = (cur - prev) / prev;
    r.is_finite().then_some(r)
}

/// Simple returns `(close_t - close_{t-1}) / close_{t-1}` over ascending closes.
///
/// A pair is skipped when the prior close is non-finite or non-positive, or
/// when the current close is non-finite. Every returned value is finite.
pub fn simple_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .filter_map(|w| simple_return(w[0], w[1]))
        .collect()
}

/// Simple returns over prepared observations, each tagged with its period.
///
/// Skips the same pairs as [`simple_returns`].
pub fn dated_returns(prepared: &[PriceObservation]) -> (Vec<f64>, Vec<ReturnPeriod>) {
    prepared
        .windows(2)
        .filter_map(|w| simple_return(w[0].close, w[1].close).map(|r| (r, (w[0].date, w[1].date))))
        .unzip()
}

/// One symbol's trailing closes and the returns derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetSeries {
    pub symbol: String,
    /// Ascending closes inside the window.
    pub closes: Vec<f64>,
    pub returns: Vec<f64>,
    /// Period of each entry in `returns`, ascending.
    pub periods: Vec<ReturnPeriod>,
}

impl AssetSeries {
    /// Build from observations in any order.
    pub fn from_observations(
        symbol: impl Into<String>,
        observations: &[PriceObservation],
        window: usize,
    ) -> Self {
        let prepared = prepare_window(observations, window);
        let (returns, periods) = dated_returns(&prepared);
        Self {
            symbol: symbol.into(),
            closes: closing_prices(&prepared),
            returns,
            periods,
        }
    }

    pub fn latest_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    /// Date of the latest close that produced a return.
    pub fn last_return_date(&self) -> Option<NaiveDate> {
        self.periods.last().map(|&(_, to)| to)
    }

    /// At least two returns, the minimum for a sample variance.
    pub fn has_usable_history(&self) -> bool {
        self.returns.len() >= 2
    }
}

/// Return series calculator bound to a trailing window length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnsCalculator {
    window: usize,
}

impl ReturnsCalculator {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Returns over the trailing window; empty when fewer than two usable closes.
    pub fn returns(&self, observations: &[PriceObservation]) -> Vec<f64> {
        simple_returns(&closing_prices(&prepare_window(observations, self.window)))
    }

    pub fn series(&self, symbol: impl Into<String>, observations: &[PriceObservation]) -> AssetSeries {
        AssetSeries::from_observations(symbol, observations, self.window)
    }
}
