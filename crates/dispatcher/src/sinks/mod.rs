//! Sink implementations
//!
//! Contains FileSink and LogSink.

mod file;
mod log;

pub use self::file::{FileSink, FileSinkConfig};
pub use self::log::LogSink;
