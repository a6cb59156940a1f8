//! RecordSink trait - output interface
//!
//! Materializes a final ordered list somewhere (files, logs).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{ContractError, Record};

/// Output trait
///
/// All sink implementations must implement this trait. A write replaces any
/// previous output of the same sink.
pub trait RecordSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write the final ordered list
    ///
    /// # Errors
    /// Returns an error only when nothing could be written at all; per-file
    /// failures are collected in the [`SinkReport`].
    fn write(&mut self, records: &[Record]) -> Result<SinkReport, ContractError>;
}

/// Result of a sink write
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkReport {
    /// Sink that produced the report
    pub sink_name: String,

    /// Files successfully written
    pub written: Vec<PathBuf>,

    /// Files that failed, with the error encountered
    pub failures: Vec<SinkFailure>,
}

/// Single failed output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkFailure {
    /// Source file being copied
    pub source: PathBuf,
    /// Intended destination
    pub destination: PathBuf,
    /// Error message
    pub message: String,
}

impl SinkReport {
    pub fn new(sink_name: impl Into<String>) -> Self {
        Self {
            sink_name: sink_name.into(),
            ..Default::default()
        }
    }

    /// True when every file made it
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
