//! LogSink - logs the ordering via tracing

use contracts::{ContractError, Record, RecordSink, SinkReport};
use tracing::{debug, info, instrument};

/// Sink that logs the final ordering for review
pub struct LogSink {
    name: String,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl RecordSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_write",
        skip(self, records),
        fields(sink = %self.name, records = records.len())
    )]
    fn write(&mut self, records: &[Record]) -> Result<SinkReport, ContractError> {
        for (position, record) in records.iter().enumerate() {
            debug!(
                position,
                tag = %record.tag(),
                new_time = %record.timestamp().time(),
                capture_time = %record.timestamp_old(),
                slate = ?record.slate(),
                "ordered capture"
            );
        }

        info!(
            sink = %self.name,
            records = records.len(),
            first = ?records.first().map(Record::timestamp),
            last = ?records.last().map(Record::timestamp),
            "Final ordering"
        );
        Ok(SinkReport::new(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_sink_write_empty() {
        let mut sink = LogSink::new("test_log");
        let report = sink.write(&[]).unwrap();
        assert!(report.is_complete());
        assert_eq!(report.sink_name, "test_log");
    }

    #[test]
    fn test_log_sink_name() {
        let sink = LogSink::new("my_logger");
        assert_eq!(sink.name(), "my_logger");
    }
}
