//! Engine orchestration.
//!
//! Wires the collaborator contracts to the pure components. Every call fetches
//! fresh data; the only state that outlives a call is the optimizer snapshot,
//! and that lives in the snapshot store.

use crate::frontier::FrontierOptimizer;
use crate::market::MarketComparator;
use crate::returns::{AssetSeries, ReturnsCalculator};
use crate::sentiment::SentimentOverlay;
use crate::statistics::{merge_holdings, normalize_weights, StatisticsCalculator};
use crate::trend::TrendForecaster;
use analytics_api::EngineConfig;
use analytics_spi::{
    ForecastPoint, Holding, MarketIndexSource, MarketOverview, NewsSource,
    OptimizedPortfolioSnapshot, PortfolioStatistics, PriceHistorySource, Result, SnapshotStore,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Collaborators the engine reads from and writes to.
#[derive(Clone)]
pub struct EngineSources {
    pub prices: Arc<dyn PriceHistorySource>,
    pub news: Arc<dyn NewsSource>,
    pub indices: Arc<dyn MarketIndexSource>,
    pub snapshots: Arc<dyn SnapshotStore>,
}

/// Portfolio analytics engine.
#[derive(Clone)]
pub struct AnalyticsEngine {
    config: EngineConfig,
    sources: EngineSources,
}

impl AnalyticsEngine {
    /// Create an engine; the configuration is validated up front.
    pub fn new(config: EngineConfig, sources: EngineSources) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, sources })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn series_for(&self, holdings: &[Holding], window: usize) -> Result<HashMap<String, AssetSeries>> {
        let calculator = ReturnsCalculator::new(window);
        let mut series = HashMap::with_capacity(holdings.len());
        for holding in holdings {
            if series.contains_key(&holding.symbol) {
                continue;
            }
            let history = self.sources.prices.price_history(&holding.symbol, window)?;
            series.insert(
                holding.symbol.clone(),
                calculator.series(holding.symbol.clone(), &history),
            );
        }
        Ok(series)
    }

    // ========================================================================
    // Portfolio
    // ========================================================================

    /// Risk/return statistics over the statistics window.
    pub fn compute_statistics(&self, holdings: &[Holding]) -> Result<PortfolioStatistics> {
        normalize_weights(&merge_holdings(holdings))?;
        let series = self.series_for(holdings, self.config.windows.statistics)?;
        StatisticsCalculator::new().compute(holdings, &series)
    }

    /// Sample a frontier with `sample_count` draws and return it without storing.
    pub fn build_frontier(
        &self,
        holdings: &[Holding],
        sample_count: usize,
    ) -> Result<OptimizedPortfolioSnapshot> {
        normalize_weights(&merge_holdings(holdings))?;
        let mut config = self.config.frontier.clone();
        config.sample_count = sample_count;
        let optimizer = FrontierOptimizer::new(config)?;
        let series = self.series_for(holdings, self.config.windows.statistics)?;
        optimizer.build(holdings, &series)
    }

    /// Build a frontier with the configured sample count and store it.
    ///
    /// The stored snapshot for `portfolio_id` is replaced only when the build
    /// succeeds.
    pub fn run_optimizer(
        &self,
        portfolio_id: &str,
        holdings: &[Holding],
    ) -> Result<OptimizedPortfolioSnapshot> {
        let snapshot = self.build_frontier(holdings, self.config.frontier.sample_count)?;
        self.sources.snapshots.replace(portfolio_id, snapshot.clone())?;
        info!(
            portfolio = portfolio_id,
            points = snapshot.efficient_frontier.len(),
            calculated_at = %snapshot.calculated_at,
            "stored optimizer snapshot"
        );
        Ok(snapshot)
    }

    pub fn stored_snapshot(&self, portfolio_id: &str) -> Result<Option<OptimizedPortfolioSnapshot>> {
        self.sources.snapshots.load(portfolio_id)
    }

    // ========================================================================
    // Forecasts
    // ========================================================================

    fn forecaster(&self) -> TrendForecaster {
        TrendForecaster::from_config(&self.config.windows, &self.config.forecast)
    }

    /// Linear trend forecast; empty when the symbol has fewer than two closes.
    pub fn forecast_trend(&self, symbol: &str) -> Result<Vec<ForecastPoint>> {
        let history = self
            .sources
            .prices
            .price_history(symbol, self.config.windows.trend)?;
        Ok(self.forecaster().forecast(&history))
    }

    /// Sentiment-adjusted forecast; `None` without classified news.
    pub fn forecast_with_sentiment(&self, symbol: &str) -> Result<Option<Vec<ForecastPoint>>> {
        let history = self
            .sources
            .prices
            .price_history(symbol, self.config.windows.trend)?;
        let news = self
            .sources
            .news
            .recent_news(symbol, self.config.windows.news_days)?;
        debug!(symbol, news = news.len(), "fetched news for sentiment overlay");

        let overlay = SentimentOverlay::from_config(&self.config.sentiment);
        Ok(overlay.forecast(&self.forecaster(), &history, &news))
    }

    // ========================================================================
    // Market
    // ========================================================================

    /// Compare `symbol` against every tracked index.
    ///
    /// An index whose history cannot be fetched is left out of the comparison
    /// but its summary is still returned.
    pub fn compare_to_market(&self, symbol: &str) -> Result<MarketOverview> {
        let window = self.config.windows.comparison;
        let company = self.sources.prices.price_history(symbol, window)?;
        let indices = self.sources.indices.tracked_indices()?;

        let mut histories = HashMap::with_capacity(indices.len());
        for index in &indices {
            match self.sources.indices.index_history(&index.symbol, window) {
                Ok(history) => {
                    histories.insert(index.symbol.clone(), history);
                }
                Err(e) => warn!(index = %index.symbol, error = %e, "index history unavailable"),
            }
        }

        let comparison = MarketComparator::new(window).compare(&company, &histories)?;
        Ok(MarketOverview { comparison, indices })
    }
}
