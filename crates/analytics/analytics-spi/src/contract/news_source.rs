//! News lookup trait.

use crate::error::Result;
use crate::model::NewsItem;

/// Provider of classified news items.
pub trait NewsSource: Send + Sync {
    /// Source name, used in logs and error messages.
    fn name(&self) -> &str;

    /// News about `symbol` published within the trailing `days`.
    fn recent_news(&self, symbol: &str, days: u32) -> Result<Vec<NewsItem>>;
}
