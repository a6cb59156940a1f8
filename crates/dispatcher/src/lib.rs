//! # Dispatcher
//!
//! Output side of the pipeline.
//!
//! Responsibilities:
//! - Materialize a final ordered list as renamed copies
//! - Fan the same list out to several sinks
//! - Report per-file failures without rolling back

pub mod dispatcher;
pub mod error;
pub mod naming;
pub mod sinks;

pub use contracts::{RecordSink, SinkReport};
pub use dispatcher::Dispatcher;
pub use error::DispatcherError;
pub use naming::output_stem;
pub use sinks::{FileSink, FileSinkConfig, LogSink};
