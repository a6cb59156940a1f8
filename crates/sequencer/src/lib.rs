//! # Sequencer
//!
//! Statistical sequencing of PPS route captures whose camera timestamps are
//! unreliable.
//!
//! Responsibilities:
//! - Partition captures around the open and end slates
//! - Fit Gaussian interval models per bin
//! - Greedily assign undetermined captures to the likelier bin
//! - Remap both bins onto a canonical timeline
//! - Re-run the remap after operator corrections
//!
//! ## Usage Example
//!
//! ```ignore
//! use sequencer::Sequencer;
//!
//! let engine = Sequencer::new(SequencerConfig::default());
//! let outcome = engine.sequence(&records, open_index, end_index, &mut sink)?;
//!
//! // operator flags positions 3 and 17 of the final list
//! let corrected = engine.reorder(
//!     &records,
//!     &outcome.plan.forward_bin,
//!     &outcome.plan.reverse_bin,
//!     open_index,
//!     end_index,
//!     outcome.plan.mean_interval,
//!     &[3, 17],
//!     &mut sink,
//! )?;
//! ```

mod assign;
mod correction;
mod engine;
mod model;
mod partition;
mod remap;

// Re-exports
pub use assign::AssignmentSummary;
pub use contracts::{AssignmentStrategy, FallbackModel, Record, SequencerConfig, Slate};
pub use correction::{apply_corrections, Membership};
pub use engine::{
    CorrectionOutcome, CorrectionPlan, Diagnostics, SequenceOutcome, SequencePlan, Sequencer,
};
pub use model::{BinModels, TimingModel};
pub use partition::{partition, Partition};
pub use remap::canonical_gap;
