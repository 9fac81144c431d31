//! Classified news model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentiment classification of a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// A news item about a symbol. `sentiment` is `None` when unclassified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub published_on: NaiveDate,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
}

impl NewsItem {
    pub fn new(published_on: NaiveDate, headline: impl Into<String>, sentiment: Option<Sentiment>) -> Self {
        Self {
            published_on,
            headline: headline.into(),
            sentiment,
        }
    }
}
