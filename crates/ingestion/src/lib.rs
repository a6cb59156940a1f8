//! # Ingestion
//!
//! Capture discovery for the sequencer.
//!
//! Responsibilities:
//! - Find primary (JPG) and linked (DNG) assets
//! - Pair them by filename stem, refusing mismatched sets
//! - Tag the open and end slates
//! - Attach a capture time to every pair
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::{Ingestor, ModifiedTimeSource};
//!
//! let ingestor = Ingestor::new(config.ingest.clone(), Box::new(ModifiedTimeSource));
//! let set = ingestor.ingest()?;
//! engine.sequence(&set.records, set.open_index, set.end_index, &mut sink)?;
//! ```

mod error;
mod ingestor;
mod pairing;
mod scanner;
mod slate;
mod timestamps;

// Re-exports
pub use contracts::{IngestConfig, Record, Slate, TimestampSourceConfig};
pub use error::{IngestionError, Result};
pub use ingestor::{IngestedSet, Ingestor};
pub use pairing::{pair_assets, AssetPair};
pub use scanner::AssetScanner;
pub use slate::{locate_slates, SlateMarkers};
pub use timestamps::{
    parse_capture_time, source_from_config, ManifestTimestamps, ModifiedTimeSource,
    TimestampSource,
};
