//! Basic example demonstrating the portfolio analytics engine
//!
//! Run with: cargo run --example basic -p analytics-facade
//! Set RUST_LOG=analytics_core=debug for component-level logging.

use analytics_facade::*;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn sample_history(start: f64, drift: f64, swing: f64, days: usize) -> Vec<PriceObservation> {
    let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    std::iter::once(first)
        .chain(trading_days_after(first, days))
        .take(days)
        .enumerate()
        .map(|(i, date)| {
            let t = i as f64;
            PriceObservation::new(date, start + drift * t + (t * 0.4).sin() * swing)
        })
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "analytics_core=info".into()),
        )
        .init();

    println!("=== Portfolio Analytics Basic Example ===\n");

    let prices = InMemoryPriceHistory::new()
        .with_history("ACME", sample_history(120.0, 0.35, 3.0, 160))
        .with_history("GLOBEX", sample_history(45.0, 0.05, 1.2, 160))
        .with_history("INITECH", sample_history(80.0, -0.02, 2.5, 160));

    let last_day = prices
        .price_history("ACME", 1)?
        .first()
        .map(|o| o.date)
        .unwrap_or_default();

    let news = InMemoryNews::new(last_day).with_items(
        "ACME",
        vec![
            NewsItem::new(last_day, "ACME beats estimates", Some(Sentiment::Positive)),
            NewsItem::new(last_day, "ACME expands overseas", Some(Sentiment::Positive)),
            NewsItem::new(last_day, "Analyst notes supply risk", Some(Sentiment::Negative)),
        ],
    );

    let indices = InMemoryMarketIndices::new().with_index(
        MarketIndexSummary {
            symbol: "BROAD".to_string(),
            name: "Broad Market".to_string(),
            current_price: 4800.0,
            change: 12.0,
            change_percent: 0.25,
        },
        sample_history(4500.0, 2.0, 20.0, 160),
    );

    let engine = AnalyticsEngine::new(
        EngineConfig::default().with_frontier(FrontierConfig::new(5000).with_seed(2024)),
        EngineSources {
            prices: Arc::new(prices),
            news: Arc::new(news),
            indices: Arc::new(indices),
            snapshots: Arc::new(InMemorySnapshotStore::new()),
        },
    )?;

    let holdings = vec![
        Holding::new("ACME", 40.0),
        Holding::new("GLOBEX", 35.0),
        Holding::new("INITECH", 25.0),
    ];

    // 1. Portfolio statistics
    let stats = engine.compute_statistics(&holdings)?;
    println!("1. Portfolio statistics ({} observations)", stats.observation_count);
    println!("   Expected daily return: {:.5}", stats.expected_return);
    println!("   Volatility:            {:.5}", stats.volatility);
    println!("   Sharpe ratio:          {:.4}", stats.sharpe_ratio);

    // 2. Optimizer run
    let snapshot = engine.run_optimizer("demo", &holdings)?;
    println!("\n2. Optimizer ({} frontier points)", snapshot.efficient_frontier.len());
    println!("   Max-Sharpe weights:    {:?}", snapshot.max_sharpe_weights);
    println!("   Min-variance weights:  {:?}", snapshot.min_variance_weights);

    // 3. Forecasts
    println!("\n3. ACME forecast");
    let trend = engine.forecast_trend("ACME")?;
    let adjusted = engine.forecast_with_sentiment("ACME")?.unwrap_or_default();
    for (t, s) in trend.iter().zip(adjusted.iter()) {
        println!(
            "   {}  trend {:>8.2} ({:.2})  sentiment {:>8.2} ({:.2})",
            t.date, t.predicted_price, t.confidence, s.predicted_price, s.confidence
        );
    }

    // 4. Market comparison
    let overview = engine.compare_to_market("ACME")?;
    println!("\n4. Market comparison");
    println!("   ACME 30-day return: {:.4}", overview.comparison.company_return);
    println!("   Outperformed:       {:?}", overview.comparison.outperformers);
    println!("   Underperformed by:  {:?}", overview.comparison.underperformers);

    if let Ok(json) = serde_json::to_string_pretty(&overview.comparison) {
        println!("\n{}", json);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
