//! FileSink - copies the ordered captures into a fresh output tree

use contracts::{path_within, ContractError, Record, RecordSink, SinkFailure, SinkReport};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument};

use crate::naming::output_stem;

/// Subdirectory receiving primary assets
pub const PRIMARY_DIR: &str = "jpgs";
/// Subdirectory receiving linked assets
pub const LINKED_DIR: &str = "dngs";

/// Configuration for FileSink
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Output tree root; deleted and recreated on every write
    pub base_path: PathBuf,
}

impl FileSinkConfig {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn primary_dir(&self) -> PathBuf {
        self.base_path.join(PRIMARY_DIR)
    }

    pub fn linked_dir(&self) -> PathBuf {
        self.base_path.join(LINKED_DIR)
    }
}

/// Sink that writes renamed copies to disk
pub struct FileSink {
    name: String,
    config: FileSinkConfig,
}

impl FileSink {
    /// Create a new FileSink
    pub fn new(name: impl Into<String>, config: FileSinkConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    pub fn config(&self) -> &FileSinkConfig {
        &self.config
    }

    /// First source asset that lives under the output tree, if any
    fn source_under_tree<'a>(&self, records: &'a [Record]) -> Option<&'a Path> {
        records
            .iter()
            .flat_map(|r| [r.source_path(), r.linked_path()])
            .find(|source| path_within(source, &self.config.base_path))
    }

    fn reset_tree(&self) -> std::io::Result<()> {
        let base = &self.config.base_path;
        if base.exists() {
            fs::remove_dir_all(base)?;
        }
        fs::create_dir_all(self.config.primary_dir())?;
        fs::create_dir_all(self.config.linked_dir())?;
        debug!(sink = %self.name, path = %base.display(), "output tree reset");
        Ok(())
    }

    fn copy_record(&self, position: usize, record: &Record, report: &mut SinkReport) {
        let stem = output_stem(position, record);
        let targets = [
            (record.source_path(), self.config.primary_dir()),
            (record.linked_path(), self.config.linked_dir()),
        ];

        for (source, dir) in targets {
            let destination = dir.join(file_name(&stem, source));
            match fs::copy(source, &destination) {
                Ok(_) => report.written.push(destination),
                Err(e) => {
                    error!(
                        sink = %self.name,
                        source = %source.display(),
                        destination = %destination.display(),
                        error = %e,
                        "Copy failed"
                    );
                    report.failures.push(SinkFailure {
                        source: source.to_path_buf(),
                        destination,
                        message: e.to_string(),
                    });
                }
            }
        }
    }
}

/// `stem` plus the source's extension, when it has one
fn file_name(stem: &str, source: &Path) -> String {
    match source.extension() {
        Some(ext) => format!("{}.{}", stem, ext.to_string_lossy()),
        None => stem.to_string(),
    }
}

impl RecordSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_sink_write",
        skip(self, records),
        fields(sink = %self.name, records = records.len())
    )]
    fn write(&mut self, records: &[Record]) -> Result<SinkReport, ContractError> {
        if let Some(source) = self.source_under_tree(records) {
            error!(sink = %self.name, source = %source.display(), "Source asset inside output tree");
            return Err(ContractError::sink_reset(
                &self.name,
                &self.config.base_path,
                format!(
                    "source asset '{}' lives under the output tree, refusing to delete it",
                    source.display()
                ),
            ));
        }

        self.reset_tree().map_err(|e| {
            error!(sink = %self.name, error = %e, "Output reset failed");
            ContractError::sink_reset(&self.name, &self.config.base_path, e.to_string())
        })?;

        let mut report = SinkReport::new(&self.name);
        for (position, record) in records.iter().enumerate() {
            self.copy_record(position, record, &mut report);
        }

        observability::record_sink_write(&self.name, report.written.len(), report.failures.len());
        info!(
            sink = %self.name,
            written = report.written.len(),
            failed = report.failures.len(),
            path = %self.config.base_path.display(),
            "Output tree written"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::Slate;
    use tempfile::tempdir;

    fn write_asset(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, name.as_bytes()).unwrap();
        path
    }

    fn record(dir: &Path, stem: &str, h: u32, m: u32) -> Record {
        let ts = NaiveDate::from_ymd_opt(2023, 6, 14)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap();
        Record::new(
            ts,
            write_asset(dir, &format!("{stem}.jpg")),
            write_asset(dir, &format!("{stem}.dng")),
            Slate::None,
        )
    }

    #[test]
    fn test_file_sink_write() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let base = output.path().join("ordered");

        let records = vec![
            record(input.path(), "a", 6, 1),
            record(input.path(), "b", 6, 4),
        ];

        let mut sink = FileSink::new("files", FileSinkConfig::new(&base));
        let report = sink.write(&records).unwrap();

        assert!(report.is_complete());
        assert_eq!(report.written.len(), 4);
        assert!(base.join("jpgs/0_a_new-time=06-01-00.jpg").exists());
        assert!(base.join("dngs/1_b_new-time=06-04-00.dng").exists());
        let copied = fs::read_to_string(base.join("jpgs/1_b_new-time=06-04-00.jpg")).unwrap();
        assert_eq!(copied, "b.jpg");
    }

    #[test]
    fn test_write_replaces_previous_output() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let base = output.path().to_path_buf();
        let mut sink = FileSink::new("files", FileSinkConfig::new(&base));

        let first = vec![
            record(input.path(), "a", 6, 1),
            record(input.path(), "b", 6, 4),
        ];
        sink.write(&first).unwrap();

        let second = vec![record(input.path(), "b", 6, 1)];
        sink.write(&second).unwrap();

        let names: Vec<_> = fs::read_dir(base.join(PRIMARY_DIR))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["0_b_new-time=06-01-00.jpg".to_string()]);
    }

    #[test]
    fn test_missing_source_reported_not_fatal() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let good = record(input.path(), "a", 6, 1);
        let missing = good.clone();
        fs::remove_file(missing.linked_path()).unwrap();

        let mut sink = FileSink::new("files", FileSinkConfig::new(output.path()));
        let report = sink.write(&[missing]).unwrap();

        assert_eq!(report.written.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].source, good.linked_path());
        assert!(!report.failures[0].message.is_empty());
    }

    #[test]
    fn test_refuses_to_reset_tree_holding_sources() {
        let route = tempdir().unwrap();
        let jpg_dir = route.path().join("jpg");
        fs::create_dir(&jpg_dir).unwrap();
        let records = vec![record(&jpg_dir, "a", 6, 1), record(&jpg_dir, "b", 6, 4)];

        let mut sink = FileSink::new("files", FileSinkConfig::new(route.path()));
        let err = sink.write(&records).unwrap_err();

        assert!(matches!(err, ContractError::SinkReset { .. }), "got: {err}");
        assert!(err.to_string().contains("refusing to delete"), "got: {err}");
        for r in &records {
            assert!(r.source_path().exists());
            assert!(r.linked_path().exists());
        }
        assert!(!route.path().join(PRIMARY_DIR).exists());
    }
}
