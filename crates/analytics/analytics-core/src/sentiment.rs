//! News sentiment overlay for trend forecasts.

use crate::trend::TrendForecaster;
use analytics_api::SentimentConfig;
use analytics_spi::{ForecastMethod, ForecastPoint, NewsItem, PriceObservation, Sentiment};
use tracing::debug;

/// Counts of news items by classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentTally {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub unclassified: usize,
}

impl SentimentTally {
    pub fn from_news(news: &[NewsItem]) -> Self {
        news.iter().fold(Self::default(), |mut tally, item| {
            match item.sentiment {
                Some(Sentiment::Positive) => tally.positive += 1,
                Some(Sentiment::Negative) => tally.negative += 1,
                Some(Sentiment::Neutral) => tally.neutral += 1,
                None => tally.unclassified += 1,
            }
            tally
        })
    }

    pub fn classified(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    pub fn total(&self) -> usize {
        self.classified() + self.unclassified
    }

    /// `(positive - negative) / classified`, in `[-1, 1]`.
    pub fn net_score(&self) -> Option<f64> {
        let classified = self.classified();
        if classified == 0 {
            return None;
        }
        Some((self.positive as f64 - self.negative as f64) / classified as f64)
    }

    /// Share of news items that carry a classification.
    pub fn coverage(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some(self.classified() as f64 / total as f64)
    }
}

/// Shifts trend forecasts by recent news sentiment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentOverlay {
    adjustment: f64,
}

impl SentimentOverlay {
    pub fn new(adjustment: f64) -> Self {
        Self { adjustment }
    }

    pub fn from_config(config: &SentimentConfig) -> Self {
        Self::new(config.adjustment)
    }

    /// Adjust an existing trend forecast.
    ///
    /// Returns `None` when no news item in the window is classified. Each
    /// price is scaled by `1 + adjustment * net_score`; confidence is the
    /// mean of the trend R² and the classification coverage.
    pub fn apply(&self, trend: &[ForecastPoint], news: &[NewsItem]) -> Option<Vec<ForecastPoint>> {
        let tally = SentimentTally::from_news(news);
        let net = tally.net_score()?;
        let coverage = tally.coverage()?;
        let factor = 1.0 + self.adjustment * net;

        debug!(
            positive = tally.positive,
            negative = tally.negative,
            neutral = tally.neutral,
            unclassified = tally.unclassified,
            net,
            "applying sentiment overlay"
        );

        Some(
            trend
                .iter()
                .map(|point| ForecastPoint {
                    date: point.date,
                    predicted_price: point.predicted_price * factor,
                    confidence: ((point.confidence + coverage) / 2.0).clamp(0.0, 1.0),
                    method: ForecastMethod::SentimentAdjusted,
                })
                .collect(),
        )
    }

    /// Trend forecast for `observations`, then the overlay.
    pub fn forecast(
        &self,
        forecaster: &TrendForecaster,
        observations: &[PriceObservation],
        news: &[NewsItem],
    ) -> Option<Vec<ForecastPoint>> {
        self.apply(&forecaster.forecast(observations), news)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    fn news(sentiments: &[Option<Sentiment>]) -> Vec<NewsItem> {
        sentiments
            .iter()
            .enumerate()
            .map(|(i, s)| NewsItem::new(date(i as u32 + 1), format!("headline {}", i), *s))
            .collect()
    }

    fn trend_points() -> Vec<ForecastPoint> {
        (0..3)
            .map(|i| ForecastPoint {
                date: date(20 + i),
                predicted_price: 100.0,
                confidence: 0.8,
                method: ForecastMethod::LinearRegression,
            })
            .collect()
    }

    #[test]
    fn test_tally_counts() {
        let tally = SentimentTally::from_news(&news(&[
            Some(Sentiment::Positive),
            Some(Sentiment::Positive),
            Some(Sentiment::Negative),
            Some(Sentiment::Neutral),
            None,
        ]));
        assert_eq!(tally.classified(), 4);
        assert_eq!(tally.total(), 5);
        assert_eq!(tally.net_score(), Some(0.25));
        assert_eq!(tally.coverage(), Some(0.8));
    }

    #[test]
    fn test_no_classified_news_gives_none() {
        let overlay = SentimentOverlay::new(0.02);
        assert!(overlay.apply(&trend_points(), &[]).is_none());
        assert!(overlay.apply(&trend_points(), &news(&[None, None])).is_none());
    }

    #[test]
    fn test_positive_news_lifts_prices() {
        let overlay = SentimentOverlay::new(0.02);
        let adjusted = overlay
            .apply(&trend_points(), &news(&[Some(Sentiment::Positive), Some(Sentiment::Positive)]))
            .unwrap();

        assert_eq!(adjusted.len(), 3);
        for point in &adjusted {
            assert!((point.predicted_price - 102.0).abs() < 1e-9);
            assert!((point.confidence - 0.9).abs() < 1e-12);
            assert_eq!(point.method, ForecastMethod::SentimentAdjusted);
        }
    }

    #[test]
    fn test_negative_news_lowers_prices() {
        let overlay = SentimentOverlay::new(0.05);
        let adjusted = overlay
            .apply(&trend_points(), &news(&[Some(Sentiment::Negative), None]))
            .unwrap();
        assert!((adjusted[0].predicted_price - 95.0).abs() < 1e-9);
        assert!((adjusted[0].confidence - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_balanced_news_keeps_prices() {
        let overlay = SentimentOverlay::new(0.02);
        let adjusted = overlay
            .apply(
                &trend_points(),
                &news(&[Some(Sentiment::Positive), Some(Sentiment::Negative)]),
            )
            .unwrap();
        assert_eq!(adjusted[1].predicted_price, 100.0);
        assert_eq!(adjusted[1].date, trend_points()[1].date);
    }

    #[test]
    fn test_empty_trend_with_news() {
        let overlay = SentimentOverlay::new(0.02);
        let adjusted = overlay.apply(&[], &news(&[Some(Sentiment::Neutral)])).unwrap();
        assert!(adjusted.is_empty());
    }
}
