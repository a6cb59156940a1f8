//! # Contracts
//!
//! Frozen interface contracts shared by every crate of the PPS sequencer.
//! Business crates depend only on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Capture times are wall-clock `NaiveDateTime` values read from the camera
//! - Differences between captures are whole seconds on a 24h clock
//! - Remapped timestamps are canonical (route starts at 06:01:00) and carry no
//!   absolute meaning beyond the ordering they express

mod blueprint;
mod error;
mod record;
mod sequencer_config;
mod sink;

pub use blueprint::*;
pub use error::*;
pub use record::*;
pub use sequencer_config::*;
pub use sink::*;
