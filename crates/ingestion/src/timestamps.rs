//! Capture time sources

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use contracts::{ContractError, TimestampSourceConfig};
use tracing::debug;

use crate::error::{IngestionError, Result};
use crate::pairing::AssetPair;

/// Accepted textual capture time layouts (ISO-like and EXIF)
const TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y:%m:%d %H:%M:%S"];

/// Supplies the capture time of an asset pair
pub trait TimestampSource {
    fn name(&self) -> &str;

    fn capture_time(&self, pair: &AssetPair) -> Result<NaiveDateTime>;
}

/// Parse a capture time in any of the accepted layouts
pub fn parse_capture_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Capture times read from a manifest keyed by filename stem
///
/// TOML (`PPS_0001 = "2023-06-14 06:03:00"`) or a flat JSON object, chosen by
/// file extension.
#[derive(Debug, Clone, Default)]
pub struct ManifestTimestamps {
    entries: HashMap<String, NaiveDateTime>,
}

impl ManifestTimestamps {
    pub fn from_entries(entries: HashMap<String, NaiveDateTime>) -> Self {
        Self { entries }
    }

    /// Load a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| IngestionError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        Self::parse(&content, is_json).map_err(|message| IngestionError::Manifest {
            path: path.to_path_buf(),
            message,
        })
    }

    fn parse(content: &str, is_json: bool) -> std::result::Result<Self, String> {
        let raw: HashMap<String, String> = if is_json {
            serde_json::from_str(content).map_err(|e| e.to_string())?
        } else {
            toml::from_str(content).map_err(|e| e.to_string())?
        };

        let mut entries = HashMap::with_capacity(raw.len());
        for (stem, value) in raw {
            let ts = parse_capture_time(&value)
                .ok_or_else(|| format!("unrecognised time '{value}' for '{stem}'"))?;
            entries.insert(stem, ts);
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TimestampSource for ManifestTimestamps {
    fn name(&self) -> &str {
        "manifest"
    }

    fn capture_time(&self, pair: &AssetPair) -> Result<NaiveDateTime> {
        let stem = pair.stem();
        self.entries.get(&stem).copied().ok_or_else(|| {
            ContractError::timestamp_missing(&pair.primary, "stem not listed in manifest").into()
        })
    }
}

/// Capture time taken from the primary asset's modification time (local clock,
/// whole seconds)
#[derive(Debug, Clone, Copy, Default)]
pub struct ModifiedTimeSource;

impl TimestampSource for ModifiedTimeSource {
    fn name(&self) -> &str {
        "modified_time"
    }

    fn capture_time(&self, pair: &AssetPair) -> Result<NaiveDateTime> {
        let modified = fs::metadata(&pair.primary)
            .and_then(|meta| meta.modified())
            .map_err(|e| ContractError::timestamp_missing(&pair.primary, e.to_string()))?;
        let local: DateTime<Local> = modified.into();
        let ts = local.naive_local();
        Ok(ts.with_nanosecond(0).unwrap_or(ts))
    }
}

/// Build the configured source; relative manifest paths resolve against `base`
pub fn source_from_config(
    config: &TimestampSourceConfig,
    base: Option<&Path>,
) -> Result<Box<dyn TimestampSource>> {
    match config {
        TimestampSourceConfig::ModifiedTime => Ok(Box::new(ModifiedTimeSource)),
        TimestampSourceConfig::Manifest { path } => {
            let resolved: PathBuf = match base {
                Some(base) if path.is_relative() => base.join(path),
                _ => path.clone(),
            };
            let manifest = ManifestTimestamps::load(&resolved)?;
            debug!(path = %resolved.display(), entries = manifest.len(), "manifest loaded");
            Ok(Box::new(manifest))
        }
    }
}
