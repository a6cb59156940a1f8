//! Error types for CLI operations.

use std::path::PathBuf;

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Neither a configuration file nor the required flags were given
    #[error("Missing input: {what} (pass --config or --{what})")]
    MissingInput { what: String },

    /// Session file unreadable or corrupt
    #[error("Failed to read session {}: {message}", path.display())]
    SessionRead { path: PathBuf, message: String },

    /// Session file could not be written
    #[error("Failed to write session {}: {message}", path.display())]
    SessionWrite { path: PathBuf, message: String },

    /// Command requires a loaded route
    #[error("No route loaded in this session; run `load` first")]
    NothingLoaded,

    /// Command requires a sequenced route
    #[error("Route has not been sorted in this session; run `sort` first")]
    NotSequenced,

    /// Some files could not be copied
    #[error("{failed} file(s) could not be written by sink '{sink}'")]
    IncompleteOutput { sink: String, failed: usize },
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn missing_input(what: impl Into<String>) -> Self {
        Self::MissingInput { what: what.into() }
    }

    pub fn session_read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SessionRead {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn session_write(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SessionWrite {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
