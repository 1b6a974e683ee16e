use itertools::{Itertools, MinMaxResult};

use crate::time_series::AttemptPoint;

/// Percentile reported in the summary row
pub const SUMMARY_PERCENTILE: f64 = 90.0;

/// Aggregates over recorded reaction times.
///
/// Every metric is recomputed from the borrowed samples on each call and
/// returns `None` when there is nothing to aggregate, so callers can show a
/// placeholder instead of a number.
#[derive(Debug, Clone, Copy)]
pub struct StatsEngine<'a> {
    samples: &'a [f64],
}

/// Headline numbers for the stats tab
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub best: f64,
    pub p90: f64,
    pub std_dev: f64,
}

/// One bar of the distribution chart; `end` is inclusive only for the last bin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl<'a> StatsEngine<'a> {
    pub fn new(samples: &'a [f64]) -> Self {
        Self { samples }
    }

    pub fn count(&self) -> Option<usize> {
        match self.samples.len() {
            0 => None,
            n => Some(n),
        }
    }

    pub fn mean(&self) -> Option<f64> {
        let n = self.count()?;
        Some(self.samples.iter().sum::<f64>() / n as f64)
    }

    pub fn min(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::max)
    }

    /// Population standard deviation
    pub fn std_dev(&self) -> Option<f64> {
        let mean = self.mean()?;
        let variance = self
            .samples
            .iter()
            .map(|value| {
                let diff = mean - *value;

                diff * diff
            })
            .sum::<f64>()
            / self.samples.len() as f64;

        Some(variance.sqrt())
    }

    /// Linear-interpolation percentile; `p` is clamped to 0..=100
    pub fn percentile(&self, p: f64) -> Option<f64> {
        if p.is_nan() {
            return None;
        }
        let sorted = self.sorted();
        let last = sorted.len().checked_sub(1)?;

        let idx = p.clamp(0.0, 100.0) / 100.0 * last as f64;
        let lower = idx.floor() as usize;
        let upper = (idx.ceil() as usize).min(last);

        Some(sorted[lower] + (idx - lower as f64) * (sorted[upper] - sorted[lower]))
    }

    /// Split the sample range into at most `max_bins` equal-width bins.
    /// When every sample is equal there is a single bin holding all of them.
    pub fn histogram(&self, max_bins: usize) -> Option<Vec<HistogramBin>> {
        let (low, high) = match self.samples.iter().copied().minmax_by(f64::total_cmp) {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(v) => (v, v),
            MinMaxResult::MinMax(low, high) => (low, high),
        };

        if high <= low {
            return Some(vec![HistogramBin {
                start: low,
                end: high,
                count: self.samples.len(),
            }]);
        }

        let bins = max_bins.max(1);
        let width = (high - low) / bins as f64;
        let mut counts = vec![0usize; bins];
        for value in self.samples {
            let idx = (((value - low) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(
            counts
                .into_iter()
                .enumerate()
                .map(|(i, count)| HistogramBin {
                    start: low + i as f64 * width,
                    end: if i == bins - 1 {
                        high
                    } else {
                        low + (i + 1) as f64 * width
                    },
                    count,
                })
                .collect(),
        )
    }

    /// Samples in recording order, for the trend line
    pub fn sequence(&self) -> Option<Vec<AttemptPoint>> {
        self.count()?;
        Some(
            self.samples
                .iter()
                .enumerate()
                .map(|(attempt, &reaction)| AttemptPoint::new(attempt, reaction))
                .collect(),
        )
    }

    pub fn summary(&self) -> Option<Summary> {
        Some(Summary {
            count: self.count()?,
            mean: self.mean()?,
            best: self.min()?,
            p90: self.percentile(SUMMARY_PERCENTILE)?,
            std_dev: self.std_dev()?,
        })
    }

    fn sorted(&self) -> Vec<f64> {
        self.samples
            .iter()
            .copied()
            .sorted_by(f64::total_cmp)
            .collect()
    }
}
