//! PipelineBlueprint - Config Loader output
//!
//! Describes a complete sequencing run: where the captures live, how their
//! timestamps are read, how the sequencer behaves and where output goes.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::SequencerConfig;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Input discovery
    pub ingest: IngestConfig,

    /// Sequencing behaviour
    #[serde(default)]
    pub sequencer: SequencerConfig,

    /// Output tree
    pub output: OutputConfig,
}

/// Input discovery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Directory holding the primary (JPG) assets
    pub jpg_dir: PathBuf,

    /// Directory holding the linked (DNG) assets
    pub dng_dir: PathBuf,

    /// Extension of primary assets (case-insensitive)
    #[serde(default = "default_primary_extension")]
    pub primary_extension: String,

    /// Extension of linked assets (case-insensitive)
    #[serde(default = "default_linked_extension")]
    pub linked_extension: String,

    /// Stem fragment identifying the open slate
    #[serde(default = "default_open_marker")]
    pub open_marker: String,

    /// Stem fragment identifying the end slate
    #[serde(default = "default_end_marker")]
    pub end_marker: String,

    /// Where capture times come from
    #[serde(default)]
    pub timestamps: TimestampSourceConfig,
}

fn default_primary_extension() -> String {
    "jpg".to_string()
}

fn default_linked_extension() -> String {
    "dng".to_string()
}

fn default_open_marker() -> String {
    "open".to_string()
}

fn default_end_marker() -> String {
    "end".to_string()
}

impl IngestConfig {
    /// Configuration with default extensions and markers
    pub fn new(jpg_dir: impl Into<PathBuf>, dng_dir: impl Into<PathBuf>) -> Self {
        Self {
            jpg_dir: jpg_dir.into(),
            dng_dir: dng_dir.into(),
            primary_extension: default_primary_extension(),
            linked_extension: default_linked_extension(),
            open_marker: default_open_marker(),
            end_marker: default_end_marker(),
            timestamps: TimestampSourceConfig::default(),
        }
    }
}

/// Capture time source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimestampSourceConfig {
    /// Manifest file mapping stem to capture time (TOML or JSON)
    Manifest { path: PathBuf },
    /// File modification time
    #[default]
    ModifiedTime,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output tree root; reset on every write
    pub dir: PathBuf,

    /// Also log the final ordering
    #[serde(default = "default_log_summary")]
    pub log_summary: bool,
}

fn default_log_summary() -> bool {
    true
}

/// Absolute form of `path` with `.` and `..` resolved.
///
/// The longest existing ancestor is canonicalized so symlinked roots compare
/// equal; components below it are resolved lexically.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    let lexical = lexical_normalize(&absolute);

    let mut existing = lexical.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return missing
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return lexical,
        }
    }
}

fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// True when `path` is `root` or lies anywhere below it
pub fn path_within(path: &Path, root: &Path) -> bool {
    normalize_path(path).starts_with(normalize_path(root))
}

/// True when either path equals or contains the other
pub fn paths_overlap(a: &Path, b: &Path) -> bool {
    path_within(a, b) || path_within(b, a)
}
