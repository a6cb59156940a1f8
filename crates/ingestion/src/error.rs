//! Ingestion error types

use std::path::PathBuf;

use contracts::ContractError;
use thiserror::Error;

/// Ingestion errors
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Input directory missing or not a directory
    #[error("input directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// Timestamp manifest could not be read or parsed
    #[error("invalid timestamp manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// Input-set violation shared with the rest of the pipeline
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl IngestionError {
    /// Underlying contract error, if any
    pub fn as_contract(&self) -> Option<&ContractError> {
        match self {
            Self::Contract(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for IngestionError {
    fn from(e: std::io::Error) -> Self {
        Self::Contract(ContractError::Io(e))
    }
}

/// Ingestion Result alias
pub type Result<T> = std::result::Result<T, IngestionError>;
