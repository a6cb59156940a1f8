//! Layered error definitions
//!
//! Categorized by source: config / ingestion / sequencing / sink

use std::path::PathBuf;

use thiserror::Error;

use crate::Slate;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Ingestion Errors =====
    /// Primary and linked asset counts differ
    #[error("asset count mismatch: {primary} primary vs {linked} linked assets")]
    AssetCountMismatch { primary: usize, linked: usize },

    /// Primary asset without a linked asset of the same stem
    #[error("no linked asset for '{}'", path.display())]
    UnpairedAsset { path: PathBuf },

    /// Required slate not found
    #[error("no {slate:?} slate in record set")]
    SlateMissing { slate: Slate },

    /// Slate tagged on more than one record
    #[error("{slate:?} slate found twice: '{first}' and '{second}'")]
    SlateDuplicate {
        slate: Slate,
        first: String,
        second: String,
    },

    /// Capture time could not be determined
    #[error("no timestamp for '{}': {message}", path.display())]
    TimestampMissing { path: PathBuf, message: String },

    // ===== Sequencing Errors =====
    /// Nothing to sequence
    #[error("record set is empty")]
    EmptyRecordSet,

    /// Anchor indices do not identify two distinct records
    #[error("invalid anchors: open={open_index}, end={end_index}, records={len}")]
    InvalidAnchors {
        open_index: usize,
        end_index: usize,
        len: usize,
    },

    /// Remapped time does not fit the calendar
    #[error("remapped timeline out of range: {message}")]
    TimelineOverflow { message: String },

    // ===== Sink Errors =====
    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    /// Output tree could not be reset
    #[error("sink '{sink_name}' could not reset '{}': {message}", path.display())]
    SinkReset {
        sink_name: String,
        path: PathBuf,
        message: String,
    },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create timestamp lookup error
    pub fn timestamp_missing(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::TimestampMissing {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Create sink reset error
    pub fn sink_reset(
        sink_name: impl Into<String>,
        path: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::SinkReset {
            sink_name: sink_name.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create timeline overflow error
    pub fn timeline_overflow(message: impl Into<String>) -> Self {
        Self::TimelineOverflow {
            message: message.into(),
        }
    }

    /// Structural input problems abort a run; everything else is reported
    pub fn is_input_mismatch(&self) -> bool {
        matches!(
            self,
            Self::AssetCountMismatch { .. }
                | Self::UnpairedAsset { .. }
                | Self::SlateMissing { .. }
                | Self::SlateDuplicate { .. }
                | Self::EmptyRecordSet
                | Self::InvalidAnchors { .. }
        )
    }
}
