//! Ingestor - scan, pair, tag, timestamp

use std::path::Path;

use contracts::{IngestConfig, Record};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::Result;
use crate::pairing::pair_assets;
use crate::scanner::AssetScanner;
use crate::slate::{locate_slates, SlateMarkers};
use crate::timestamps::{source_from_config, TimestampSource};

/// Records ready for sequencing, with their anchor positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestedSet {
    /// Records sorted by primary asset filename
    pub records: Vec<Record>,
    pub open_index: usize,
    pub end_index: usize,
}

impl IngestedSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Turns two asset directories into an [`IngestedSet`]
pub struct Ingestor {
    config: IngestConfig,
    source: Box<dyn TimestampSource>,
}

impl Ingestor {
    pub fn new(config: IngestConfig, source: Box<dyn TimestampSource>) -> Self {
        Self { config, source }
    }

    /// Ingestor using the configured timestamp source; relative manifest paths
    /// resolve against `base`
    pub fn from_config(config: IngestConfig, base: Option<&Path>) -> Result<Self> {
        let source = source_from_config(&config.timestamps, base)?;
        Ok(Self::new(config, source))
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    #[instrument(
        name = "ingest",
        skip(self),
        fields(
            jpg_dir = %self.config.jpg_dir.display(),
            dng_dir = %self.config.dng_dir.display(),
            source = self.source.name(),
        )
    )]
    pub fn ingest(&self) -> Result<IngestedSet> {
        let primaries = AssetScanner::new(&self.config.primary_extension).scan(&self.config.jpg_dir)?;
        let linked = AssetScanner::new(&self.config.linked_extension).scan(&self.config.dng_dir)?;
        let pairs = pair_assets(&primaries, &linked)?;

        let markers = SlateMarkers::from_config(&self.config);
        let records = pairs
            .iter()
            .map(|pair| {
                let ts = self.source.capture_time(pair)?;
                Ok(Record::new(
                    ts,
                    pair.primary.clone(),
                    pair.linked.clone(),
                    markers.classify(&pair.stem()),
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        let (open_index, end_index) = locate_slates(&records)?;

        info!(
            records = records.len(),
            open = %records[open_index].tag(),
            end = %records[end_index].tag(),
            "ingestion complete"
        );

        Ok(IngestedSet {
            records,
            open_index,
            end_index,
        })
    }
}
