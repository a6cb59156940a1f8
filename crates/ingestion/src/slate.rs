//! Slate tagging

use contracts::{ContractError, IngestConfig, Record, Slate};

/// Stem fragments identifying the two slates (case-insensitive)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlateMarkers {
    open: String,
    end: String,
}

impl SlateMarkers {
    pub fn new(open: impl AsRef<str>, end: impl AsRef<str>) -> Self {
        Self {
            open: open.as_ref().to_lowercase(),
            end: end.as_ref().to_lowercase(),
        }
    }

    pub fn from_config(config: &IngestConfig) -> Self {
        Self::new(&config.open_marker, &config.end_marker)
    }

    /// Slate role of a filename stem; the open marker wins when both match
    pub fn classify(&self, stem: &str) -> Slate {
        let stem = stem.to_lowercase();
        if stem.contains(&self.open) {
            Slate::Open
        } else if stem.contains(&self.end) {
            Slate::End
        } else {
            Slate::None
        }
    }
}

impl Default for SlateMarkers {
    fn default() -> Self {
        Self::new("open", "end")
    }
}

/// Indices of the OPEN and END records; each must appear exactly once
pub fn locate_slates(records: &[Record]) -> Result<(usize, usize), ContractError> {
    let open = find_unique(records, Slate::Open)?;
    let end = find_unique(records, Slate::End)?;
    Ok((open, end))
}

fn find_unique(records: &[Record], slate: Slate) -> Result<usize, ContractError> {
    let mut found: Option<usize> = None;
    for (idx, record) in records.iter().enumerate() {
        if record.slate() != slate {
            continue;
        }
        if let Some(first) = found {
            return Err(ContractError::SlateDuplicate {
                slate,
                first: records[first].tag(),
                second: record.tag(),
            });
        }
        found = Some(idx);
    }
    found.ok_or(ContractError::SlateMissing { slate })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(tag: &str, slate: Slate) -> Record {
        let ts = NaiveDate::from_ymd_opt(2023, 6, 14)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        Record::new(ts, format!("/j/{tag}.jpg"), format!("/d/{tag}.dng"), slate)
    }

    #[test]
    fn test_classify() {
        let markers = SlateMarkers::default();
        assert_eq!(markers.classify("PPS_OPEN"), Slate::Open);
        assert_eq!(markers.classify("route_end_slate"), Slate::End);
        assert_eq!(markers.classify("PPS_0042"), Slate::None);
    }

    #[test]
    fn test_custom_markers() {
        let markers = SlateMarkers::new("start", "finish");
        assert_eq!(markers.classify("day1_Start"), Slate::Open);
        assert_eq!(markers.classify("end"), Slate::None);
    }

    #[test]
    fn test_locate_slates() {
        let records = vec![
            record("a", Slate::None),
            record("end", Slate::End),
            record("open", Slate::Open),
        ];
        assert_eq!(locate_slates(&records).unwrap(), (2, 1));
    }

    #[test]
    fn test_missing_and_duplicate_slates() {
        let missing = vec![record("open", Slate::Open), record("a", Slate::None)];
        assert!(matches!(
            locate_slates(&missing),
            Err(ContractError::SlateMissing { slate: Slate::End })
        ));

        let duplicate = vec![
            record("open", Slate::Open),
            record("open2", Slate::Open),
            record("end", Slate::End),
        ];
        match locate_slates(&duplicate) {
            Err(ContractError::SlateDuplicate { first, second, .. }) => {
                assert_eq!(first, "open");
                assert_eq!(second, "open2");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
