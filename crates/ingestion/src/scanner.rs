//! Directory scanning

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{IngestionError, Result};

/// Collects the files of one directory carrying a given extension
#[derive(Debug, Clone)]
pub struct AssetScanner {
    extension: String,
}

impl AssetScanner {
    /// Scanner for `extension` (leading dot optional, case-insensitive)
    pub fn new(extension: impl AsRef<str>) -> Self {
        Self {
            extension: extension.as_ref().trim_start_matches('.').to_lowercase(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Matching files directly inside `dir`, sorted by path
    pub fn scan(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(IngestionError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            match entry {
                Ok(entry) if entry.file_type().is_file() && self.matches(entry.path()) => {
                    files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => warn!(dir = %dir.display(), error = %e, "skipping unreadable entry"),
            }
        }
        files.sort();

        debug!(
            dir = %dir.display(),
            extension = %self.extension,
            count = files.len(),
            "scan complete"
        );
        Ok(files)
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase() == self.extension)
            .unwrap_or(false)
    }
}
