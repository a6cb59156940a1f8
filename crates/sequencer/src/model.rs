//! Gaussian timing models fitted on inter-capture intervals.

use contracts::{FallbackModel, Record};
use observability::RunningStats;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Mean and spread of the interval between consecutive captures (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingModel {
    pub mean_s: f64,
    pub std_s: f64,
    /// Fixed constants were used instead of fitted values
    pub fallback: bool,
}

impl TimingModel {
    /// Fit on `intervals`, or fall back when they are empty or have no spread
    pub fn fit(intervals: &[f64], fallback: &FallbackModel) -> Self {
        let stats: RunningStats = intervals.iter().copied().collect();
        let mean = stats.mean();
        let std = stats.population_std_dev();

        if stats.count() == 0 || !mean.is_finite() || !std.is_finite() || std <= 0.0 {
            return Self::fallback(fallback);
        }

        Self {
            mean_s: mean,
            std_s: std,
            fallback: false,
        }
    }

    pub fn fallback(fallback: &FallbackModel) -> Self {
        Self {
            mean_s: fallback.mean_s,
            std_s: fallback.std_s,
            fallback: true,
        }
    }

    /// Standardized residual of an observed interval
    pub fn residual(&self, observed_s: f64) -> f64 {
        (observed_s - self.mean_s) / self.std_s
    }
}

/// Intervals between consecutive records of a bin, in bin order
pub fn intervals(bin: &[Record]) -> Vec<f64> {
    bin.windows(2)
        .map(|pair| pair[1].seconds_since(&pair[0]) as f64)
        .collect()
}

/// Models of both bins plus the pooled model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinModels {
    pub forward: TimingModel,
    pub reverse: TimingModel,
    pub combined: TimingModel,
}

impl BinModels {
    /// Fit all three models from the bins as they stand after partitioning
    pub fn fit(forward: &[Record], reverse: &[Record], fallback: &FallbackModel) -> Self {
        let forward_intervals = intervals(forward);
        let reverse_intervals = intervals(reverse);
        let pooled: Vec<f64> = forward_intervals
            .iter()
            .chain(reverse_intervals.iter())
            .copied()
            .collect();

        let models = Self {
            forward: TimingModel::fit(&forward_intervals, fallback),
            reverse: TimingModel::fit(&reverse_intervals, fallback),
            combined: TimingModel::fit(&pooled, fallback),
        };

        for (bin, model) in models.named() {
            if model.fallback {
                warn!(
                    bin,
                    mean_s = model.mean_s,
                    std_s = model.std_s,
                    "degenerate intervals, using fallback timing model"
                );
                observability::record_fallback(bin);
            }
        }

        models
    }

    /// Number of models running on fallback constants
    pub fn fallback_count(&self) -> usize {
        self.named().iter().filter(|(_, m)| m.fallback).count()
    }

    fn named(&self) -> [(&'static str, TimingModel); 3] {
        [
            ("forward", self.forward),
            ("reverse", self.reverse),
            ("combined", self.combined),
        ]
    }
}
