//! Linear trend forecasting.
//!
//! Fits `price = intercept + slope * t` by ordinary least squares over a
//! trailing price window, where `t` is the zero-based day index, and
//! extrapolates the line over the next trading days.

use crate::calendar::trading_days_after;
use crate::returns::prepare_window;
use analytics_api::{ForecastConfig, WindowConfig};
use analytics_spi::{closing_prices, AnalyticsError, ForecastMethod, ForecastPoint, PriceObservation, Result};
use tracing::debug;

/// A fitted least-squares trend line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    pub intercept: f64,
    /// Change per time index.
    pub slope: f64,
    /// Coefficient of determination, clamped to `[0, 1]`.
    ///
    /// A series with no variance is fitted exactly by a flat line and gets 1.0.
    pub r_squared: f64,
    pub n_observations: usize,
}

impl TrendLine {
    /// Fit the line to `values` indexed `0..n`.
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(AnalyticsError::insufficient("trend fit", 2, values.len()));
        }

        let n = values.len() as f64;
        let mean_t = (n - 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / n;

        let (mut s_ty, mut s_tt) = (0.0, 0.0);
        for (i, &y) in values.iter().enumerate() {
            let dt = i as f64 - mean_t;
            s_ty += dt * (y - mean_y);
            s_tt += dt * dt;
        }

        let slope = s_ty / s_tt;
        let intercept = mean_y - slope * mean_t;

        let ss_tot: f64 = values.iter().map(|&y| (y - mean_y).powi(2)).sum();
        let ss_res: f64 = values
            .iter()
            .enumerate()
            .map(|(i, &y)| (y - (intercept + slope * i as f64)).powi(2))
            .sum();

        let flat_tolerance = f64::EPSILON * n * mean_y.abs().max(1.0).powi(2);
        let r_squared = if ss_tot > flat_tolerance {
            (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
        } else {
            1.0
        };

        Ok(Self {
            intercept,
            slope,
            r_squared,
            n_observations: values.len(),
        })
    }

    pub fn value_at(&self, t: f64) -> f64 {
        self.intercept + self.slope * t
    }

    /// Values for the `steps` indices following the fitted range.
    pub fn extrapolate(&self, steps: usize) -> Vec<f64> {
        (0..steps)
            .map(|i| self.value_at((self.n_observations + i) as f64))
            .collect()
    }
}

/// Trend forecaster over a trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendForecaster {
    window: usize,
    horizon: usize,
}

impl TrendForecaster {
    pub fn new(window: usize, horizon: usize) -> Self {
        Self { window, horizon }
    }

    pub fn from_config(windows: &WindowConfig, forecast: &ForecastConfig) -> Self {
        Self::new(windows.trend, forecast.horizon)
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Fit the trailing window; `None` with fewer than two usable closes.
    pub fn fit(&self, observations: &[PriceObservation]) -> Option<(TrendLine, PriceObservation)> {
        let prepared = prepare_window(observations, self.window);
        let line = TrendLine::fit(&closing_prices(&prepared)).ok()?;
        let last = prepared.last()?.clone();
        Some((line, last))
    }

    /// Forecast the next `horizon` trading days.
    ///
    /// Fewer than two usable closes gives an empty forecast.
    pub fn forecast(&self, observations: &[PriceObservation]) -> Vec<ForecastPoint> {
        let Some((line, last)) = self.fit(observations) else {
            debug!(observations = observations.len(), "not enough closes for a trend forecast");
            return Vec::new();
        };

        trading_days_after(last.date, self.horizon)
            .into_iter()
            .zip(line.extrapolate(self.horizon))
            .map(|(date, predicted_price)| ForecastPoint {
                date,
                predicted_price,
                confidence: line.r_squared,
                method: ForecastMethod::LinearRegression,
            })
            .collect()
    }
}
