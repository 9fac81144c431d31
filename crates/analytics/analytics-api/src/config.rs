//! Analytics configuration types.

use analytics_spi::{AnalyticsError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Window Configuration
// ============================================================================

/// Trailing window lengths used by each computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Daily observations used for portfolio statistics and the frontier.
    pub statistics: usize,
    /// Daily observations used for trend forecasting.
    pub trend: usize,
    /// Daily observations used for market comparison.
    pub comparison: usize,
    /// Calendar days of news used for the sentiment overlay.
    pub news_days: u32,
}

impl WindowConfig {
    pub fn new(statistics: usize, trend: usize, comparison: usize, news_days: u32) -> Self {
        Self {
            statistics,
            trend,
            comparison,
            news_days,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("windows.statistics", self.statistics),
            ("windows.trend", self.trend),
            ("windows.comparison", self.comparison),
        ] {
            if value < 2 {
                return Err(AnalyticsError::invalid_parameter(
                    name,
                    format!("must be at least 2, got {}", value),
                ));
            }
        }
        if self.news_days == 0 {
            return Err(AnalyticsError::invalid_parameter(
                "windows.news_days",
                "must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            statistics: 120,
            trend: 90,
            comparison: 30,
            news_days: 14,
        }
    }
}

// ============================================================================
// Frontier Configuration
// ============================================================================

/// Which sampled points the frontier keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrontierMode {
    /// Every sampled allocation, in sampling order.
    Cloud,
    /// The highest-return sample per equal-width risk bucket, by ascending risk.
    RiskBuckets { buckets: usize },
}

impl Default for FrontierMode {
    fn default() -> Self {
        FrontierMode::Cloud
    }
}

/// Monte-Carlo frontier sampling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontierConfig {
    /// Number of random allocations drawn per run.
    pub sample_count: usize,
    /// Base seed; `None` draws a fresh one per run.
    pub seed: Option<u64>,
    pub mode: FrontierMode,
    /// Evaluate sample chunks on the rayon pool.
    pub parallel: bool,
    /// Samples per independently seeded chunk.
    pub chunk_size: usize,
}

impl FrontierConfig {
    pub fn new(sample_count: usize) -> Self {
        Self {
            sample_count,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_mode(mut self, mode: FrontierMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_count == 0 {
            return Err(AnalyticsError::invalid_parameter(
                "frontier.sample_count",
                "must be positive",
            ));
        }
        if self.chunk_size == 0 {
            return Err(AnalyticsError::invalid_parameter(
                "frontier.chunk_size",
                "must be positive",
            ));
        }
        if let FrontierMode::RiskBuckets { buckets: 0 } = self.mode {
            return Err(AnalyticsError::invalid_parameter(
                "frontier.mode.buckets",
                "must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            sample_count: 5_000,
            seed: None,
            mode: FrontierMode::Cloud,
            parallel: true,
            chunk_size: 1_024,
        }
    }
}

// ============================================================================
// Forecast Configuration
// ============================================================================

/// Trend forecast configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Trading days to project past the last observation.
    pub horizon: usize,
}

impl ForecastConfig {
    pub fn new(horizon: usize) -> Self {
        Self { horizon }
    }

    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(AnalyticsError::invalid_parameter(
                "forecast.horizon",
                "must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self { horizon: 5 }
    }
}

// ============================================================================
// Sentiment Configuration
// ============================================================================

/// Sentiment overlay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// Proportional price shift per unit of net sentiment (e.g. 0.02 = 2%).
    pub adjustment: f64,
}

impl SentimentConfig {
    pub fn new(adjustment: f64) -> Self {
        Self { adjustment }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.adjustment.is_finite() || !(0.0..1.0).contains(&self.adjustment) {
            return Err(AnalyticsError::invalid_parameter(
                "sentiment.adjustment",
                format!("must be in [0, 1), got {}", self.adjustment),
            ));
        }
        Ok(())
    }
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self { adjustment: 0.02 }
    }
}

// ============================================================================
// Engine Configuration
// ============================================================================

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub windows: WindowConfig,
    pub frontier: FrontierConfig,
    pub forecast: ForecastConfig,
    pub sentiment: SentimentConfig,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_windows(mut self, windows: WindowConfig) -> Self {
        self.windows = windows;
        self
    }

    pub fn with_frontier(mut self, frontier: FrontierConfig) -> Self {
        self.frontier = frontier;
        self
    }

    pub fn with_forecast(mut self, forecast: ForecastConfig) -> Self {
        self.forecast = forecast;
        self
    }

    pub fn with_sentiment(mut self, sentiment: SentimentConfig) -> Self {
        self.sentiment = sentiment;
        self
    }

    /// Parse a JSON document; missing sections fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AnalyticsError::invalid_parameter("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.windows.validate()?;
        self.frontier.validate()?;
        self.forecast.validate()?;
        self.sentiment.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_windows() {
        let windows = WindowConfig::default();
        assert_eq!(windows.statistics, 120);
        assert_eq!(windows.trend, 90);
        assert_eq!(windows.comparison, 30);
        assert_eq!(windows.news_days, 14);
        assert!(windows.validate().is_ok());
    }

    #[test]
    fn test_window_of_two_is_allowed() {
        assert!(WindowConfig::new(2, 2, 2, 1).validate().is_ok());
    }

    #[test]
    fn test_window_below_two_rejected() {
        let err = WindowConfig::new(120, 1, 30, 14).validate().unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::InvalidParameter { ref name, .. } if name == "windows.trend"
        ));
    }

    #[test]
    fn test_frontier_builder() {
        let config = FrontierConfig::new(2_000)
            .with_seed(7)
            .with_parallel(false)
            .with_mode(FrontierMode::RiskBuckets { buckets: 50 });
        assert_eq!(config.sample_count, 2_000);
        assert_eq!(config.seed, Some(7));
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_frontier_rejects_zero_samples_and_buckets() {
        assert!(FrontierConfig::new(0).validate().is_err());
        assert!(FrontierConfig::default().with_chunk_size(0).validate().is_err());
        assert!(FrontierConfig::default()
            .with_mode(FrontierMode::RiskBuckets { buckets: 0 })
            .validate()
            .is_err());
    }

    #[test]
    fn test_sentiment_adjustment_bounds() {
        assert!(SentimentConfig::new(0.0).validate().is_ok());
        assert!(SentimentConfig::new(-0.1).validate().is_err());
        assert!(SentimentConfig::new(1.0).validate().is_err());
        assert!(SentimentConfig::new(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_engine_config_from_partial_json() {
        let json = r#"{
            "windows": { "trend": 60 },
            "frontier": { "sample_count": 1000, "seed": 42, "mode": { "kind": "risk_buckets", "buckets": 25 } }
        }"#;
        let config = EngineConfig::from_json_str(json).unwrap();
        assert_eq!(config.windows.trend, 60);
        assert_eq!(config.windows.statistics, 120);
        assert_eq!(config.frontier.sample_count, 1000);
        assert_eq!(config.frontier.seed, Some(42));
        assert_eq!(config.frontier.mode, FrontierMode::RiskBuckets { buckets: 25 });
        assert_eq!(config.forecast.horizon, 5);
    }

    #[test]
    fn test_engine_config_from_invalid_json() {
        let err = EngineConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidParameter { ref name, .. } if name == "config"));

        let err = EngineConfig::from_json_str(r#"{"forecast":{"horizon":0}}"#).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidParameter { ref name, .. } if name == "forecast.horizon"));
    }

    #[test]
    fn test_engine_config_roundtrip_json() {
        let config = EngineConfig::new().with_forecast(ForecastConfig::new(10));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }
}
