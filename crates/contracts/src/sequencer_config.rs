//! Sequencer configuration contracts that can be shared across crates.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Sequencer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SequencerConfig {
    /// Canonical time assigned to the open slate
    #[serde(default = "default_canonical_open")]
    pub canonical_open: NaiveTime,

    /// Expected end of the route; reported next to the achieved end, never enforced
    #[serde(default = "default_reference_end")]
    pub reference_end: NaiveTime,

    /// Gap between the forward and reverse segments, in mean intervals
    #[serde(default = "default_gap_multiplier")]
    #[validate(range(exclusive_min = 0.0))]
    pub gap_multiplier: f64,

    /// How undetermined captures are assigned
    #[serde(default)]
    pub strategy: AssignmentStrategy,

    /// Model used when a bin's intervals are degenerate
    #[serde(default)]
    #[validate(nested)]
    pub fallback: FallbackModel,
}

fn default_canonical_open() -> NaiveTime {
    NaiveTime::from_hms_opt(6, 1, 0).unwrap_or_default()
}

fn default_reference_end() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 6, 0).unwrap_or_default()
}

fn default_gap_multiplier() -> f64 {
    6.0
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            canonical_open: default_canonical_open(),
            reference_end: default_reference_end(),
            gap_multiplier: default_gap_multiplier(),
            strategy: AssignmentStrategy::default(),
            fallback: FallbackModel::default(),
        }
    }
}

/// Fixed timing model (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct FallbackModel {
    /// Mean interval between captures
    #[validate(range(exclusive_min = 0.0))]
    pub mean_s: f64,
    /// Standard deviation of the interval
    #[validate(range(exclusive_min = 0.0))]
    pub std_s: f64,
}

impl Default for FallbackModel {
    fn default() -> Self {
        Self {
            mean_s: 180.0,
            std_s: 45.0,
        }
    }
}

/// Strategy for assigning undetermined captures to bins
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStrategy {
    /// Evaluate one capture, push the following capture to the reverse bin
    /// unevaluated. Reproduces the established field output.
    #[default]
    LookAhead,
    /// Evaluate every capture against both bins on its own
    Pairwise,
}
