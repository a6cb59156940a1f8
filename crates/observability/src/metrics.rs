//! Sequencing metrics
//!
//! Thin wrappers over the `metrics` facade plus a running statistics helper.
//! Without an installed recorder the macros are no-ops.

use metrics::{counter, gauge, histogram};

/// Record a completed sequencing pass
pub fn record_sequence_pass(forward: usize, reverse: usize, fallbacks: usize) {
    counter!("pps_sequencer_passes_total").increment(1);
    gauge!("pps_sequencer_forward_bin_len").set(forward as f64);
    gauge!("pps_sequencer_reverse_bin_len").set(reverse as f64);
    if fallbacks > 0 {
        counter!("pps_sequencer_passes_with_fallback_total").increment(1);
    }
}

/// Record a timing model falling back to fixed constants
pub fn record_fallback(bin: &str) {
    counter!("pps_sequencer_model_fallback_total", "bin" => bin.to_string()).increment(1);
}

/// Record a correction pass
pub fn record_correction_pass(applied: usize, rejected: usize) {
    counter!("pps_sequencer_corrections_total").increment(1);
    histogram!("pps_sequencer_corrected_positions").record(applied as f64);
    if rejected > 0 {
        counter!("pps_sequencer_rejected_positions_total").increment(rejected as u64);
    }
}

/// Record a sink write
pub fn record_sink_write(sink_name: &str, written: usize, failed: usize) {
    counter!(
        "pps_sequencer_files_written_total",
        "sink" => sink_name.to_string()
    )
    .increment(written as u64);
    if failed > 0 {
        counter!(
            "pps_sequencer_files_failed_total",
            "sink" => sink_name.to_string()
        )
        .increment(failed as u64);
    }
}

/// Summary of a [`RunningStats`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.population_std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.1}, max={:.1}, mean={:.1}, std={:.1} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Add a value
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Population variance (n)
    pub fn population_variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }

    pub fn population_std_dev(&self) -> f64 {
        self.population_variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::default();
        for value in iter {
            stats.push(value);
        }
        stats
    }
}
