//! Statistics aggregation from simulated profit samples.
//!
//! Builds a serializable summary (mean, spread, percentiles, histogram) from
//! one batch of trial profits, suitable for JSON export by the simulate bin.

use std::path::Path;

use serde::Serialize;

/// Target number of histogram bins; widened to at least 1 profit unit.
const HISTOGRAM_BINS: usize = 60;

#[derive(Serialize)]
pub struct ProfitStatistics {
    pub num_trials: u64,
    pub seed: u64,
    pub mean: f64,
    pub std_dev: f64,
    pub std_error: f64,
    pub min: f64,
    pub max: f64,
    pub percentiles: Percentiles,
    pub histogram: Vec<HistogramBin>,
}

#[derive(Serialize)]
pub struct Percentiles {
    pub p5: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
    pub p99: f64,
}

#[derive(Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u32,
}

/// Aggregate a profit sample into summary statistics.
///
/// Profits need not be sorted; an internal sorted copy drives the
/// percentiles and histogram.
pub fn aggregate_statistics(profits: &[f64], seed: u64) -> ProfitStatistics {
    let mut sorted = profits.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let n = sorted.len();
    if n == 0 {
        return ProfitStatistics {
            num_trials: 0,
            seed,
            mean: 0.0,
            std_dev: 0.0,
            std_error: 0.0,
            min: 0.0,
            max: 0.0,
            percentiles: Percentiles {
                p5: 0.0,
                p25: 0.0,
                p50: 0.0,
                p75: 0.0,
                p95: 0.0,
                p99: 0.0,
            },
            histogram: Vec::new(),
        };
    }

    let mean = sorted.iter().sum::<f64>() / n as f64;
    let variance = sorted.iter().map(|&p| (p - mean).powi(2)).sum::<f64>() / n as f64;
    let std_dev = variance.sqrt();

    let pct = |p: f64| sorted[((n - 1) as f64 * p).round() as usize];

    ProfitStatistics {
        num_trials: n as u64,
        seed,
        mean,
        std_dev,
        std_error: std_dev / (n as f64).sqrt(),
        min: sorted[0],
        max: sorted[n - 1],
        percentiles: Percentiles {
            p5: pct(0.05),
            p25: pct(0.25),
            p50: pct(0.50),
            p75: pct(0.75),
            p95: pct(0.95),
            p99: pct(0.99),
        },
        histogram: build_histogram(&sorted),
    }
}

/// Fixed-width bins over [min, max]. Profits are integer-valued (face ×
/// rounds left), so bin width is floored at 1.
fn build_histogram(sorted: &[f64]) -> Vec<HistogramBin> {
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let span = (max - min).max(1.0);
    let width = (span / HISTOGRAM_BINS as f64).max(1.0);
    let num_bins = (span / width).ceil() as usize;

    let mut bins: Vec<HistogramBin> = (0..num_bins)
        .map(|i| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &p in sorted {
        let i = (((p - min) / width) as usize).min(num_bins - 1);
        bins[i].count += 1;
    }
    bins
}

/// Write statistics as pretty-printed JSON.
pub fn save_statistics(stats: &ProfitStatistics, path: &Path) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, stats)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_known_sample() {
        let profits = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = aggregate_statistics(&profits, 42);
        assert_eq!(stats.num_trials, 8);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.std_dev, 2.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn histogram_counts_cover_sample() {
        let profits: Vec<f64> = (1..=500).map(|i| (i % 24 + 1) as f64).collect();
        let stats = aggregate_statistics(&profits, 0);
        let total: u32 = stats.histogram.iter().map(|b| b.count).sum();
        assert_eq!(total, 500);
    }

    #[test]
    fn empty_sample_yields_zeroed_stats() {
        let stats = aggregate_statistics(&[], 1);
        assert_eq!(stats.num_trials, 0);
        assert!(stats.histogram.is_empty());
    }

    #[test]
    fn percentiles_ordered() {
        let profits: Vec<f64> = (0..1000).map(|i| (i % 30) as f64).collect();
        let p = aggregate_statistics(&profits, 0).percentiles;
        assert!(p.p5 <= p.p25 && p.p25 <= p.p50 && p.p50 <= p.p75);
        assert!(p.p75 <= p.p95 && p.p95 <= p.p99);
    }
}
