//! Forecast models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a forecast point was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    /// Least-squares trend extrapolation.
    LinearRegression,
    /// Trend extrapolation shifted by recent news sentiment.
    SentimentAdjusted,
}

impl ForecastMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMethod::LinearRegression => "linear_regression",
            ForecastMethod::SentimentAdjusted => "sentiment_adjusted",
        }
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One projected trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_price: f64,
    /// Fit quality in `[0, 1]`.
    pub confidence: f64,
    pub method: ForecastMethod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names() {
        assert_eq!(ForecastMethod::LinearRegression.to_string(), "linear_regression");
        assert_eq!(
            serde_json::to_string(&ForecastMethod::SentimentAdjusted).unwrap(),
            "\"sentiment_adjusted\""
        );
    }
}
