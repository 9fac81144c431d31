//! Monte-Carlo efficient frontier sampling.
//!
//! Draws random long-only allocations on the probability simplex, evaluates
//! each with the portfolio statistics formulas, and tracks the max-Sharpe and
//! min-variance samples. This is a randomized heuristic: results vary between
//! runs unless a seed is configured.

use crate::returns::AssetSeries;
use crate::statistics::{merge_holdings, normalize_weights, portfolio_return, portfolio_variance, sharpe_ratio, AlignedReturns};
use analytics_api::{FrontierConfig, FrontierMode};
use analytics_spi::{AnalyticsError, FrontierPoint, Holding, OptimizedPortfolioSnapshot, Result};
use chrono::Utc;
use rand::prelude::*;
use rand_distr::Exp1;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;
use tracing::{debug, info};

/// One evaluated allocation.
#[derive(Debug, Clone)]
struct Sample {
    weights: Vec<f64>,
    expected_return: f64,
    variance: f64,
    risk: f64,
    sharpe: f64,
}

impl Sample {
    fn evaluate(weights: Vec<f64>, means: &[f64], covariance: &[Vec<f64>]) -> Self {
        let expected_return = portfolio_return(&weights, means);
        let variance = portfolio_variance(&weights, covariance);
        let risk = variance.sqrt();
        Self {
            weights,
            expected_return,
            variance,
            risk,
            sharpe: sharpe_ratio(expected_return, risk),
        }
    }
}

/// Draw a uniform point on the simplex by normalizing exponential variates.
fn random_weights(n: usize, rng: &mut impl Rng) -> Vec<f64> {
    let raw: Vec<f64> = (0..n).map(|_| rng.sample::<f64, _>(Exp1)).collect();
    let sum: f64 = raw.iter().sum();
    if sum > 0.0 && sum.is_finite() {
        raw.iter().map(|v| v / sum).collect()
    } else {
        vec![1.0 / n as f64; n]
    }
}

fn weight_map(symbols: &[String], weights: &[f64]) -> BTreeMap<String, f64> {
    symbols
        .iter()
        .cloned()
        .zip(weights.iter().copied())
        .collect()
}

/// Monte-Carlo frontier optimizer.
#[derive(Debug, Clone)]
pub struct FrontierOptimizer {
    config: FrontierConfig,
}

impl FrontierOptimizer {
    /// Create an optimizer; the configuration is validated up front.
    pub fn new(config: FrontierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FrontierConfig {
        &self.config
    }

    /// Sample the frontier for the holdings' symbols.
    ///
    /// Holding weights are validated like the statistics path but do not
    /// steer sampling. Holdings without at least two returns are left out;
    /// fewer than two remaining holdings is insufficient data.
    pub fn build(
        &self,
        holdings: &[Holding],
        series: &HashMap<String, AssetSeries>,
    ) -> Result<OptimizedPortfolioSnapshot> {
        let holdings = merge_holdings(holdings);
        normalize_weights(&holdings)?;
        let mut usable: Vec<&AssetSeries> = Vec::with_capacity(holdings.len());
        for holding in &holdings {
            match series.get(&holding.symbol) {
                Some(asset) if asset.has_usable_history() => usable.push(asset),
                _ => debug!(symbol = %holding.symbol, "excluded from frontier: no usable return history"),
            }
        }

        if usable.len() < 2 {
            return Err(AnalyticsError::insufficient(
                "holdings with usable return history",
                2,
                usable.len(),
            ));
        }

        let aligned = AlignedReturns::align(&usable)?;
        let symbols: Vec<String> = aligned.symbols.iter().map(|s| s.to_string()).collect();
        self.optimize(&symbols, &aligned.means(), &aligned.covariance())
    }

    /// Sample the frontier from precomputed mean returns and covariance.
    pub fn optimize(
        &self,
        symbols: &[String],
        means: &[f64],
        covariance: &[Vec<f64>],
    ) -> Result<OptimizedPortfolioSnapshot> {
        let n = symbols.len();
        if n < 2 {
            return Err(AnalyticsError::insufficient(
                "holdings with usable return history",
                2,
                n,
            ));
        }
        if means.len() != n || covariance.len() != n || covariance.iter().any(|row| row.len() != n) {
            return Err(AnalyticsError::invalid_parameter(
                "covariance",
                format!("expected {} means and a {}x{} matrix", n, n, n),
            ));
        }

        let started = Instant::now();
        let seed = self.config.seed.unwrap_or_else(|| thread_rng().gen());
        let samples = self.sample(seed, means, covariance);

        // `sample` always yields `sample_count >= 1` samples.
        let mut max_sharpe = 0;
        let mut min_variance = 0;
        for (i, s) in samples.iter().enumerate().skip(1) {
            if s.sharpe > samples[max_sharpe].sharpe {
                max_sharpe = i;
            }
            if s.variance < samples[min_variance].variance {
                min_variance = i;
            }
        }

        info!(
            assets = n,
            samples = samples.len(),
            seed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            max_sharpe = samples[max_sharpe].sharpe,
            min_risk = samples[min_variance].risk,
            "sampled efficient frontier"
        );

        Ok(OptimizedPortfolioSnapshot {
            max_sharpe_weights: weight_map(symbols, &samples[max_sharpe].weights),
            min_variance_weights: weight_map(symbols, &samples[min_variance].weights),
            efficient_frontier: self.frontier_points(symbols, &samples),
            calculated_at: Utc::now(),
        })
    }

    /// Draw `sample_count` allocations in independently seeded chunks.
    ///
    /// Chunk `i` uses `seed + i`, so a fixed seed yields the same samples
    /// whether chunks run sequentially or on the rayon pool.
    fn sample(&self, seed: u64, means: &[f64], covariance: &[Vec<f64>]) -> Vec<Sample> {
        let total = self.config.sample_count;
        let chunk_size = self.config.chunk_size;
        let chunks = (total + chunk_size - 1) / chunk_size;

        let run_chunk = |chunk: usize| -> Vec<Sample> {
            let len = chunk_size.min(total - chunk * chunk_size);
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(chunk as u64));
            (0..len)
                .map(|_| Sample::evaluate(random_weights(means.len(), &mut rng), means, covariance))
                .collect()
        };

        let per_chunk: Vec<Vec<Sample>> = if self.config.parallel {
            (0..chunks).into_par_iter().map(run_chunk).collect()
        } else {
            (0..chunks).map(run_chunk).collect()
        };
        per_chunk.into_iter().flatten().collect()
    }

    fn frontier_points(&self, symbols: &[String], samples: &[Sample]) -> Vec<FrontierPoint> {
        let to_point = |s: &Sample| FrontierPoint {
            risk: s.risk,
            expected_return: s.expected_return,
            weights: weight_map(symbols, &s.weights),
        };

        match self.config.mode {
            FrontierMode::Cloud => samples.iter().map(to_point).collect(),
            FrontierMode::RiskBuckets { buckets } => {
                let mut kept: Vec<&Sample> = bucket_best(samples, buckets);
                kept.sort_by(|a, b| a.risk.total_cmp(&b.risk));
                kept.into_iter().map(to_point).collect()
            }
        }
    }
}

/// Highest-return sample in each equal-width risk bucket.
fn bucket_best(samples: &[Sample], buckets: usize) -> Vec<&Sample> {
    let buckets = buckets.max(1);
    let min_risk = samples.iter().map(|s| s.risk).fold(f64::INFINITY, f64::min);
    let max_risk = samples.iter().map(|s| s.risk).fold(f64::NEG_INFINITY, f64::max);
    let width = (max_risk - min_risk) / buckets as f64;

    let mut best: Vec<Option<&Sample>> = vec![None; buckets];
    for sample in samples {
        let bucket = if width > 0.0 {
            (((sample.risk - min_risk) / width) as usize).min(buckets - 1)
        } else {
            0
        };
        match best[bucket] {
            Some(current) if current.expected_return >= sample.expected_return => {}
            _ => best[bucket] = Some(sample),
        }
    }
    best.into_iter().flatten().collect()
}
