//! Dispatcher - fan-out of one ordering to several sinks

use contracts::{ContractError, OutputConfig, Record, RecordSink, SinkReport};
use tracing::{info, instrument};

use crate::error::DispatcherError;
use crate::sinks::{FileSink, FileSinkConfig, LogSink};

/// Fan-out sink
///
/// Writes the same ordering to every registered sink, in registration order.
/// Reports are merged; the first hard error stops the fan-out.
pub struct Dispatcher {
    name: String,
    sinks: Vec<Box<dyn RecordSink>>,
}

impl Dispatcher {
    /// Empty dispatcher
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sinks: Vec::new(),
        }
    }

    /// Register a sink
    pub fn with_sink(mut self, sink: impl RecordSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Build the sinks described by `config`
    #[instrument(name = "dispatcher_from_config", skip(config), fields(dir = %config.dir.display()))]
    pub fn from_config(config: &OutputConfig) -> Result<Self, DispatcherError> {
        if config.dir.as_os_str().is_empty() {
            return Err(DispatcherError::sink_creation(
                "files",
                "output directory is empty",
            ));
        }

        let mut dispatcher =
            Self::new("output").with_sink(FileSink::new("files", FileSinkConfig::new(&config.dir)));
        if config.log_summary {
            dispatcher = dispatcher.with_sink(LogSink::new("log"));
        }
        info!(sinks = dispatcher.len(), "Dispatcher ready");
        Ok(dispatcher)
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Names of the registered sinks
    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }
}

impl RecordSink for Dispatcher {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "dispatcher_write",
        skip(self, records),
        fields(sinks = self.sinks.len(), records = records.len())
    )]
    fn write(&mut self, records: &[Record]) -> Result<SinkReport, ContractError> {
        if self.sinks.is_empty() {
            return Err(ContractError::sink_write(
                &self.name,
                DispatcherError::NoSinks.to_string(),
            ));
        }

        let mut merged = SinkReport::new(&self.name);
        for sink in &mut self.sinks {
            let report = sink.write(records)?;
            merged.written.extend(report.written);
            merged.failures.extend(report.failures);
        }
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct Failing;

    impl RecordSink for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn write(&mut self, _records: &[Record]) -> Result<SinkReport, ContractError> {
            Err(ContractError::sink_write("failing", "disk on fire"))
        }
    }

    #[test]
    fn test_from_config_registers_sinks() {
        let dir = tempdir().unwrap();
        let config = OutputConfig {
            dir: dir.path().join("out"),
            log_summary: true,
        };
        let dispatcher = Dispatcher::from_config(&config).unwrap();
        assert_eq!(dispatcher.sink_names(), vec!["files", "log"]);
    }

    #[test]
    fn test_empty_dispatcher_errors() {
        let mut dispatcher = Dispatcher::new("empty");
        assert!(dispatcher.is_empty());
        assert!(dispatcher.write(&[]).is_err());
    }

    #[test]
    fn test_hard_error_propagates() {
        let mut dispatcher = Dispatcher::new("d")
            .with_sink(LogSink::new("log"))
            .with_sink(Failing);
        let err = dispatcher.write(&[]).unwrap_err();
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_write_creates_tree() {
        let dir = tempdir().unwrap();
        let config = OutputConfig {
            dir: dir.path().join("out"),
            log_summary: false,
        };
        let mut dispatcher = Dispatcher::from_config(&config).unwrap();
        let report = dispatcher.write(&[]).unwrap();
        assert!(report.is_complete());
        assert!(config.dir.join("jpgs").is_dir());
        assert!(config.dir.join("dngs").is_dir());
    }
}
