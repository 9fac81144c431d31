//! Portfolio statistics implementation.
//!
//! Aggregates per-holding return series into portfolio-level expected
//! return, variance, volatility and Sharpe ratio.

use crate::returns::{AssetSeries, ReturnPeriod};
use analytics_spi::{AnalyticsError, Holding, PortfolioStatistics, Result};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Volatility below this is treated as zero when computing a Sharpe ratio.
const ZERO_VOLATILITY: f64 = 1e-12;

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample covariance (n - 1 denominator) of two equal-length series.
pub fn sample_covariance(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return 0.0;
    }
    let (a, b) = (&a[..n], &b[..n]);
    let (mean_a, mean_b) = (mean(a), mean(b));
    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum();
    sum / (n as f64 - 1.0)
}

/// Sample variance (n - 1 denominator).
pub fn sample_variance(values: &[f64]) -> f64 {
    sample_covariance(values, values)
}

/// Symmetric sample covariance matrix over equal-length series.
pub fn covariance_matrix(series: &[&[f64]]) -> Vec<Vec<f64>> {
    let n = series.len();
    let mut cov = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let c = sample_covariance(series[i], series[j]);
            cov[i][j] = c;
            cov[j][i] = c;
        }
    }
    cov
}

pub fn portfolio_return(weights: &[f64], means: &[f64]) -> f64 {
    weights.iter().zip(means.iter()).map(|(w, r)| w * r).sum()
}

/// `wᵀ Σ w`, clamped at zero against rounding.
pub fn portfolio_variance(weights: &[f64], covariance: &[Vec<f64>]) -> f64 {
    let mut var = 0.0;
    for (i, wi) in weights.iter().enumerate() {
        for (j, wj) in weights.iter().enumerate() {
            var += wi * wj * covariance[i][j];
        }
    }
    var.max(0.0)
}

/// Sharpe ratio with a zero risk-free rate; 0 when volatility is zero.
pub fn sharpe_ratio(expected_return: f64, volatility: f64) -> f64 {
    if volatility < ZERO_VOLATILITY {
        0.0
    } else {
        expected_return / volatility
    }
}

/// Merge holdings that repeat a symbol by summing their weights.
///
/// First-seen order is kept.
pub fn merge_holdings(holdings: &[Holding]) -> Vec<Holding> {
    let mut merged: Vec<Holding> = Vec::with_capacity(holdings.len());
    for holding in holdings {
        match merged.iter_mut().find(|h| h.symbol == holding.symbol) {
            Some(existing) => existing.weight += holding.weight,
            None => merged.push(holding.clone()),
        }
    }
    merged
}

/// Weights scaled to sum to 1, with the raw sum kept as a diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedWeights {
    pub weights: Vec<f64>,
    pub weight_sum: f64,
}

/// Validate and normalize holding weights.
///
/// Every weight must be finite and positive. An empty portfolio or a
/// zero/non-finite total is reported as insufficient data.
pub fn normalize_weights(holdings: &[Holding]) -> Result<NormalizedWeights> {
    if holdings.is_empty() {
        return Err(AnalyticsError::insufficient("portfolio holdings", 1, 0));
    }
    if let Some(bad) = holdings
        .iter()
        .find(|h| !h.weight.is_finite() || h.weight <= 0.0)
    {
        return Err(AnalyticsError::InvalidWeight {
            symbol: bad.symbol.clone(),
            weight: bad.weight,
        });
    }

    let weight_sum: f64 = holdings.iter().map(|h| h.weight).sum();
    if !weight_sum.is_finite() || weight_sum == 0.0 {
        return Err(AnalyticsError::insufficient("usable weight sum", 1, 0));
    }

    Ok(NormalizedWeights {
        weights: holdings.iter().map(|h| h.weight / weight_sum).collect(),
        weight_sum,
    })
}

/// Return series restricted to the periods every asset shares.
///
/// Returns are matched by the dates of the two closes they span, so a feed
/// that ends earlier or skips a day never pairs returns from different days.
#[derive(Debug, Clone)]
pub struct AlignedReturns<'a> {
    pub symbols: Vec<&'a str>,
    /// Shared return periods, ascending.
    pub periods: Vec<ReturnPeriod>,
    /// One row per symbol, one column per shared period.
    pub series: Vec<Vec<f64>>,
    pub observation_count: usize,
}

impl<'a> AlignedReturns<'a> {
    /// Align the given assets; fails with fewer than two shared periods.
    pub fn align(assets: &[&'a AssetSeries]) -> Result<Self> {
        let first = assets
            .first()
            .ok_or_else(|| AnalyticsError::insufficient("aligned return series", 1, 0))?;

        let lookups: Vec<HashMap<ReturnPeriod, f64>> = assets
            .iter()
            .map(|a| a.periods.iter().copied().zip(a.returns.iter().copied()).collect())
            .collect();

        let periods: Vec<ReturnPeriod> = first
            .periods
            .iter()
            .copied()
            .filter(|p| lookups.iter().all(|l| l.contains_key(p)))
            .collect();

        let observation_count = periods.len();
        if observation_count < 2 {
            return Err(AnalyticsError::insufficient(
                "shared return periods",
                2,
                observation_count,
            ));
        }

        let longest = assets.iter().map(|a| a.returns.len()).max().unwrap_or(0);
        if observation_count < longest {
            debug!(
                shared = observation_count,
                longest,
                "restricted returns to shared periods"
            );
        }

        Ok(Self {
            symbols: assets.iter().map(|&a| a.symbol.as_str()).collect(),
            series: lookups
                .iter()
                .map(|l| periods.iter().filter_map(|p| l.get(p).copied()).collect())
                .collect(),
            periods,
            observation_count,
        })
    }

    pub fn means(&self) -> Vec<f64> {
        self.series.iter().map(|s| mean(s)).collect()
    }

    pub fn covariance(&self) -> Vec<Vec<f64>> {
        let rows: Vec<&[f64]> = self.series.iter().map(Vec::as_slice).collect();
        covariance_matrix(&rows)
    }
}

/// Portfolio statistics calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsCalculator;

impl StatisticsCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute statistics for `holdings` using each symbol's series.
    ///
    /// A holding with no entry in `series` counts as having no history.
    pub fn compute(
        &self,
        holdings: &[Holding],
        series: &HashMap<String, AssetSeries>,
    ) -> Result<PortfolioStatistics> {
        let holdings = merge_holdings(holdings);
        let normalized = normalize_weights(&holdings)?;

        let assets: Vec<&AssetSeries> = holdings
            .iter()
            .map(|h| {
                series.get(&h.symbol).ok_or_else(|| {
                    AnalyticsError::insufficient(format!("price history for {}", h.symbol), 2, 0)
                })
            })
            .collect::<Result<_>>()?;

        let aligned = AlignedReturns::align(&assets)?;
        let means = aligned.means();
        let covariance = aligned.covariance();

        let expected_return = portfolio_return(&normalized.weights, &means);
        let variance = portfolio_variance(&normalized.weights, &covariance);
        let volatility = variance.sqrt();
        let sharpe_ratio = sharpe_ratio(expected_return, volatility);

        let total_value = normalized
            .weights
            .iter()
            .zip(assets.iter())
            .map(|(w, a)| w * a.latest_close().unwrap_or(0.0))
            .sum();

        let mean_returns: BTreeMap<String, f64> = aligned
            .symbols
            .iter()
            .zip(means.iter())
            .map(|(s, m)| (s.to_string(), *m))
            .collect();

        debug!(
            holdings = holdings.len(),
            observations = aligned.observation_count,
            expected_return,
            volatility,
            "computed portfolio statistics"
        );

        Ok(PortfolioStatistics {
            expected_return,
            variance,
            volatility,
            sharpe_ratio,
            weight_sum: normalized.weight_sum,
            observation_count: aligned.observation_count,
            mean_returns,
            total_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics_spi::PriceObservation;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    /// Daily observations from day `start` of January 2024.
    fn dated(start: u32, closes: &[f64]) -> Vec<PriceObservation> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceObservation::new(day(start + i as u32), c))
            .collect()
    }

    fn series_from(symbol: &str, start: u32, closes: &[f64]) -> AssetSeries {
        AssetSeries::from_observations(symbol, &dated(start, closes), 120)
    }

    fn series(symbol: &str, closes: &[f64]) -> AssetSeries {
        series_from(symbol, 1, closes)
    }

    fn correlation(aligned: &AlignedReturns) -> f64 {
        let cov = aligned.covariance();
        cov[0][1] / (cov[0][0] * cov[1][1]).sqrt()
    }

    fn universe(assets: Vec<AssetSeries>) -> HashMap<String, AssetSeries> {
        assets.into_iter().map(|a| (a.symbol.clone(), a)).collect()
    }

    #[test]
    fn test_mean_of_reference_returns() {
        let returns = crate::returns::simple_returns(&[100.0, 102.0, 101.0, 105.0, 110.0]);
        assert!((mean(&returns) - 0.02435).abs() < 1e-4);
    }

    #[test]
    fn test_sample_variance() {
        // Sample variance of [1, 2, 3, 4] is 5/3.
        assert!((sample_variance(&[1.0, 2.0, 3.0, 4.0]) - 5.0 / 3.0).abs() < 1e-12);
        assert_eq!(sample_variance(&[1.0]), 0.0);
    }

    #[test]
    fn test_covariance_matrix_symmetry() {
        let a = [0.01, -0.02, 0.03, 0.0];
        let b = [0.02, -0.01, 0.01, 0.005];
        let cov = covariance_matrix(&[&a[..], &b[..]]);
        assert_eq!(cov[0][1], cov[1][0]);
        assert!((cov[0][0] - sample_variance(&a)).abs() < 1e-15);
    }

    #[test]
    fn test_normalize_weights_sum_to_one() {
        let holdings = vec![
            Holding::new("A", 3.0),
            Holding::new("B", 1.0),
            Holding::new("C", 0.5),
        ];
        let normalized = normalize_weights(&holdings).unwrap();
        assert!((normalized.weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert_eq!(normalized.weight_sum, 4.5);
    }

    #[test]
    fn test_normalize_weights_rejects_bad_weight() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let holdings = vec![Holding::new("A", 1.0), Holding::new("B", bad)];
            let err = normalize_weights(&holdings).unwrap_err();
            assert!(matches!(err, AnalyticsError::InvalidWeight { ref symbol, .. } if symbol == "B"));
        }
    }

    #[test]
    fn test_normalize_weights_overflowing_sum() {
        let holdings = vec![Holding::new("A", f64::MAX), Holding::new("B", f64::MAX)];
        assert!(normalize_weights(&holdings).unwrap_err().is_insufficient_data());
    }

    #[test]
    fn test_merge_holdings_sums_duplicates() {
        let merged = merge_holdings(&[
            Holding::new("A", 1.0),
            Holding::new("B", 2.0),
            Holding::new("A", 0.5),
        ]);
        assert_eq!(merged, vec![Holding::new("A", 1.5), Holding::new("B", 2.0)]);
    }

    #[test]
    fn test_single_holding_statistics() {
        let closes = [100.0, 102.0, 101.0, 105.0, 110.0];
        let data = universe(vec![series("A", &closes)]);
        let stats = StatisticsCalculator::new()
            .compute(&[Holding::new("A", 2.0)], &data)
            .unwrap();

        let returns = crate::returns::simple_returns(&closes);
        assert!((stats.expected_return - mean(&returns)).abs() < 1e-12);
        assert!((stats.variance - sample_variance(&returns)).abs() < 1e-12);
        assert_eq!(stats.volatility, stats.variance.sqrt());
        assert_eq!(stats.weight_sum, 2.0);
        assert_eq!(stats.observation_count, 4);
        assert_eq!(stats.total_value, 110.0);
        assert!(stats.sharpe_ratio > 0.0);
    }

    #[test]
    fn test_two_holdings_aligned_to_shorter() {
        // B starts two days later, so only A's last three returns are shared.
        let data = universe(vec![
            series("A", &[100.0, 101.0, 99.0, 102.0, 104.0, 103.0]),
            series_from("B", 3, &[50.0, 51.0, 52.0, 50.5]),
        ]);
        let stats = StatisticsCalculator::new()
            .compute(&[Holding::new("A", 1.0), Holding::new("B", 1.0)], &data)
            .unwrap();

        assert_eq!(stats.observation_count, 3);
        assert!(stats.variance >= 0.0);
        assert_eq!(stats.volatility, stats.variance.sqrt());
        assert!((stats.total_value - (0.5 * 103.0 + 0.5 * 50.5)).abs() < 1e-12);

        let a_tail = &data["A"].returns[2..];
        assert!((stats.mean_returns["A"] - mean(a_tail)).abs() < 1e-15);
    }

    #[test]
    fn test_constant_prices_zero_sharpe() {
        let data = universe(vec![series("A", &[10.0, 10.0, 10.0, 10.0])]);
        let stats = StatisticsCalculator::new()
            .compute(&[Holding::new("A", 1.0)], &data)
            .unwrap();
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.sharpe_ratio, 0.0);
    }

    #[test]
    fn test_insufficient_history() {
        let data = universe(vec![
            series("A", &[100.0, 101.0, 102.0, 103.0]),
            series("B", &[50.0, 51.0]),
        ]);
        let err = StatisticsCalculator::new()
            .compute(&[Holding::new("A", 1.0), Holding::new("B", 1.0)], &data)
            .unwrap_err();
        assert_eq!(err, AnalyticsError::insufficient("shared return periods", 2, 1));
    }

    const IDENTICAL: [f64; 9] = [100.0, 110.0, 104.0, 90.0, 120.0, 118.0, 95.0, 97.0, 130.0];

    #[test]
    fn test_align_matches_dates_when_one_feed_ends_early() {
        let a = series("A", &IDENTICAL);
        let b = series("B", &IDENTICAL[..7]);

        let aligned = AlignedReturns::align(&[&a, &b]).unwrap();
        assert_eq!(aligned.observation_count, 6);
        assert_eq!(aligned.periods.last(), Some(&(day(6), day(7))));
        assert_eq!(aligned.series[0], aligned.series[1]);
        assert!((correlation(&aligned) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_align_drops_periods_around_a_gap() {
        let a = series("A", &IDENTICAL);
        let mut with_gap = IDENTICAL;
        with_gap[1] = f64::NAN;
        let b = series("B", &with_gap);

        // B's day 1 to day 3 return has no counterpart in A.
        let aligned = AlignedReturns::align(&[&a, &b]).unwrap();
        assert_eq!(aligned.observation_count, 6);
        assert_eq!(aligned.periods[0], (day(3), day(4)));
        assert!((correlation(&aligned) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_statistics_use_shared_dates() {
        let data = universe(vec![
            series("A", &IDENTICAL),
            series("B", &IDENTICAL[..7]),
            series("A7", &IDENTICAL[..7]),
        ]);
        let calc = StatisticsCalculator::new();
        let pair = calc
            .compute(&[Holding::new("A", 1.0), Holding::new("B", 1.0)], &data)
            .unwrap();
        let alone = calc.compute(&[Holding::new("A7", 1.0)], &data).unwrap();

        assert_eq!(pair.observation_count, 6);
        assert_eq!(pair.mean_returns["A"], pair.mean_returns["B"]);
        assert!((pair.variance - alone.variance).abs() < 1e-15);
    }

    #[test]
    fn test_missing_symbol_and_empty_portfolio() {
        let data = universe(vec![series("A", &[100.0, 101.0, 102.0])]);
        let calc = StatisticsCalculator::new();

        let err = calc
            .compute(&[Holding::new("A", 1.0), Holding::new("ZZZ", 1.0)], &data)
            .unwrap_err();
        assert!(err.is_insufficient_data());

        assert!(calc.compute(&[], &data).unwrap_err().is_insufficient_data());
    }

    #[test]
    fn test_statistics_are_deterministic() {
        let data = universe(vec![
            series("A", &[100.0, 101.0, 99.0, 102.0, 104.0]),
            series("B", &[20.0, 20.5, 20.1, 21.0, 20.7]),
        ]);
        let holdings = [Holding::new("A", 0.7), Holding::new("B", 0.3)];
        let calc = StatisticsCalculator::new();
        assert_eq!(calc.compute(&holdings, &data).unwrap(), calc.compute(&holdings, &data).unwrap());
    }
}
