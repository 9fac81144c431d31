//! In-memory collaborator implementations.
//!
//! Thread-safe stores backed by `RwLock`, used for tests and for embedding the
//! engine where data is already held in process.

use analytics_spi::{
    AnalyticsError, MarketIndexSource, MarketIndexSummary, NewsItem, NewsSource,
    OptimizedPortfolioSnapshot, PriceHistorySource, PriceObservation, Result, SnapshotStore,
};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

fn read<'a, T>(lock: &'a RwLock<T>, source: &str) -> Result<RwLockReadGuard<'a, T>> {
    lock.read()
        .map_err(|_| AnalyticsError::source_unavailable(source, "lock poisoned"))
}

fn write<'a, T>(lock: &'a RwLock<T>, source: &str) -> Result<RwLockWriteGuard<'a, T>> {
    lock.write()
        .map_err(|_| AnalyticsError::source_unavailable(source, "lock poisoned"))
}

// ============================================================================
// Price history
// ============================================================================

/// Price histories keyed by symbol.
///
/// Lookups return the newest `window` observations, newest first, the way
/// quote providers commonly do. Unknown symbols have an empty history.
#[derive(Debug, Default)]
pub struct InMemoryPriceHistory {
    histories: RwLock<HashMap<String, Vec<PriceObservation>>>,
}

impl InMemoryPriceHistory {
    const NAME: &'static str = "in-memory prices";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(self, symbol: impl Into<String>, observations: Vec<PriceObservation>) -> Self {
        if let Ok(mut histories) = self.histories.write() {
            histories.insert(symbol.into(), observations);
        }
        self
    }

    /// Replace the history stored for `symbol`.
    pub fn insert(&self, symbol: impl Into<String>, observations: Vec<PriceObservation>) -> Result<()> {
        write(&self.histories, Self::NAME)?.insert(symbol.into(), observations);
        Ok(())
    }
}

impl PriceHistorySource for InMemoryPriceHistory {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn price_history(&self, symbol: &str, window: usize) -> Result<Vec<PriceObservation>> {
        let histories = read(&self.histories, Self::NAME)?;
        let mut history = histories.get(symbol).cloned().unwrap_or_default();
        history.sort_by(|a, b| b.date.cmp(&a.date));
        history.truncate(window);
        Ok(history)
    }
}

// ============================================================================
// News
// ============================================================================

/// News items keyed by symbol, windowed relative to a fixed `as_of` date.
#[derive(Debug)]
pub struct InMemoryNews {
    as_of: NaiveDate,
    items: RwLock<HashMap<String, Vec<NewsItem>>>,
}

impl InMemoryNews {
    const NAME: &'static str = "in-memory news";

    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            items: RwLock::default(),
        }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn with_items(self, symbol: impl Into<String>, items: Vec<NewsItem>) -> Self {
        if let Ok(mut stored) = self.items.write() {
            stored.entry(symbol.into()).or_default().extend(items);
        }
        self
    }

    pub fn push(&self, symbol: impl Into<String>, item: NewsItem) -> Result<()> {
        write(&self.items, Self::NAME)?
            .entry(symbol.into())
            .or_default()
            .push(item);
        Ok(())
    }
}

impl NewsSource for InMemoryNews {
    fn name(&self) -> &str {
        Self::NAME
    }

    /// Items published in the `days` days ending on `as_of`, inclusive.
    fn recent_news(&self, symbol: &str, days: u32) -> Result<Vec<NewsItem>> {
        let since = self
            .as_of
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        let items = read(&self.items, Self::NAME)?;
        Ok(items
            .get(symbol)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| item.published_on > since && item.published_on <= self.as_of)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

// ============================================================================
// Market indices
// ============================================================================

#[derive(Debug, Default)]
struct IndexBook {
    summaries: Vec<MarketIndexSummary>,
    histories: HashMap<String, Vec<PriceObservation>>,
}

impl IndexBook {
    /// Track an index, replacing any existing entry with the same symbol.
    fn upsert(&mut self, summary: MarketIndexSummary, history: Vec<PriceObservation>) {
        self.summaries.retain(|s| s.symbol != summary.symbol);
        self.histories.insert(summary.symbol.clone(), history);
        self.summaries.push(summary);
    }
}

/// Tracked market indices with their quote summaries and close histories.
///
/// Asking for the history of an index that was never added fails with
/// `SourceUnavailable`.
#[derive(Debug, Default)]
pub struct InMemoryMarketIndices {
    book: RwLock<IndexBook>,
}

impl InMemoryMarketIndices {
    const NAME: &'static str = "in-memory indices";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index(self, summary: MarketIndexSummary, history: Vec<PriceObservation>) -> Self {
        if let Ok(mut book) = self.book.write() {
            book.upsert(summary, history);
        }
        self
    }

    /// Track an index, replacing any existing entry with the same symbol.
    pub fn insert(&self, summary: MarketIndexSummary, history: Vec<PriceObservation>) -> Result<()> {
        write(&self.book, Self::NAME)?.upsert(summary, history);
        Ok(())
    }
}

impl MarketIndexSource for InMemoryMarketIndices {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn tracked_indices(&self) -> Result<Vec<MarketIndexSummary>> {
        Ok(read(&self.book, Self::NAME)?.summaries.clone())
    }

    fn index_history(&self, symbol: &str, window: usize) -> Result<Vec<PriceObservation>> {
        let book = read(&self.book, Self::NAME)?;
        let mut history = book.histories.get(symbol).cloned().ok_or_else(|| {
            AnalyticsError::source_unavailable(Self::NAME, format!("no history for index {}", symbol))
        })?;
        history.sort_by(|a, b| b.date.cmp(&a.date));
        history.truncate(window);
        Ok(history)
    }
}

// ============================================================================
// Snapshot store
// ============================================================================

/// Optimizer snapshots keyed by portfolio id; writes replace wholesale.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    snapshots: RwLock<HashMap<String, OptimizedPortfolioSnapshot>>,
}

impl InMemorySnapshotStore {
    const NAME: &'static str = "in-memory snapshots";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self, portfolio_id: &str) -> Result<Option<OptimizedPortfolioSnapshot>> {
        Ok(read(&self.snapshots, Self::NAME)?.get(portfolio_id).cloned())
    }

    fn replace(&self, portfolio_id: &str, snapshot: OptimizedPortfolioSnapshot) -> Result<()> {
        write(&self.snapshots, Self::NAME)?.insert(portfolio_id.to_string(), snapshot);
        Ok(())
    }
}
