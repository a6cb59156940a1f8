//! Record - Ingestion output
//!
//! A single capture on the PPS route: a JPG, its linked DNG and the camera
//! timestamp that may or may not be trustworthy.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Seconds in a day; capture differences are taken modulo this.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Slate marker
///
/// Slates are the captures whose position in time is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slate {
    /// First capture of the route
    Open,
    /// Last capture of the route
    End,
    /// Regular capture
    #[default]
    None,
}

/// Captured image record
///
/// Immutable. Remapping produces a new value through [`Record::remapped`],
/// the capture time survives as `timestamp_old`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    timestamp: NaiveDateTime,
    timestamp_old: NaiveDateTime,
    source_path: PathBuf,
    linked_path: PathBuf,
    slate: Slate,
}

impl Record {
    /// Create a record straight from ingestion (both timestamps equal)
    pub fn new(
        timestamp: NaiveDateTime,
        source_path: impl Into<PathBuf>,
        linked_path: impl Into<PathBuf>,
        slate: Slate,
    ) -> Self {
        Self {
            timestamp,
            timestamp_old: timestamp,
            source_path: source_path.into(),
            linked_path: linked_path.into(),
            slate,
        }
    }

    /// Current timestamp (capture time, or canonical time after remapping)
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Original capture timestamp
    pub fn timestamp_old(&self) -> NaiveDateTime {
        self.timestamp_old
    }

    /// Primary (JPG) asset
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Linked (DNG) asset
    pub fn linked_path(&self) -> &Path {
        &self.linked_path
    }

    pub fn slate(&self) -> Slate {
        self.slate
    }

    /// Filename stem of the primary asset
    pub fn tag(&self) -> String {
        stem_of(&self.source_path)
    }

    /// Seconds elapsed from `earlier` to `self`, on a 24h clock.
    ///
    /// A negative difference wraps around the day, so a capture that precedes
    /// `earlier` yields a value close to a full day rather than a negative one.
    pub fn seconds_since(&self, earlier: &Record) -> i64 {
        (self.timestamp - earlier.timestamp)
            .num_seconds()
            .rem_euclid(SECONDS_PER_DAY)
    }

    /// Copy of this record carrying `timestamp`, original capture time preserved
    pub fn remapped(&self, timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            ..self.clone()
        }
    }
}

/// Filename stem used as record tag
pub fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 6, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn record(ts: NaiveDateTime, stem: &str) -> Record {
        Record::new(
            ts,
            format!("/in/jpg/{stem}.jpg"),
            format!("/in/dng/{stem}.dng"),
            Slate::None,
        )
    }

    #[test]
    fn test_tag_is_stem() {
        let r = record(at(6, 0, 0), "PPS_0042");
        assert_eq!(r.tag(), "PPS_0042");
    }

    #[test]
    fn test_seconds_since_forward() {
        let a = record(at(6, 0, 0), "a");
        let b = record(at(6, 3, 30), "b");
        assert_eq!(b.seconds_since(&a), 210);
    }

    #[test]
    fn test_seconds_since_wraps_negative_difference() {
        let a = record(at(6, 0, 0), "a");
        let b = record(at(5, 59, 0), "b");
        assert_eq!(b.seconds_since(&a), SECONDS_PER_DAY - 60);
    }

    #[test]
    fn test_remapped_keeps_capture_time() {
        let r = record(at(7, 12, 5), "x");
        let moved = r.remapped(at(6, 1, 0));
        assert_eq!(moved.timestamp(), at(6, 1, 0));
        assert_eq!(moved.timestamp_old(), at(7, 12, 5));
        assert_eq!(moved.source_path(), r.source_path());

        // remapping twice still points back at the capture time
        let again = moved.remapped(at(8, 0, 0));
        assert_eq!(again.timestamp_old(), at(7, 12, 5));
    }

    #[test]
    fn test_slate_serde_snake_case() {
        let json = serde_json::to_string(&Slate::Open).unwrap();
        assert_eq!(json, "\"open\"");
    }
}
