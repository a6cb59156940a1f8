//! Session state persisted between commands.

use std::fs;
use std::path::Path;

use contracts::{PipelineBlueprint, Record};
use ingestion::IngestedSet;
use sequencer::{CorrectionPlan, SequencePlan};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, Result};

/// Everything a later command needs to continue the work of an earlier one
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub blueprint: Option<PipelineBlueprint>,
    /// Records as ingested, capture times untouched
    #[serde(default)]
    pub records: Vec<Record>,
    pub open_index: Option<usize>,
    pub end_index: Option<usize>,
    #[serde(default)]
    pub forward_bin: Vec<Record>,
    #[serde(default)]
    pub reverse_bin: Vec<Record>,
    /// Last written ordering
    #[serde(default)]
    pub final_list: Vec<Record>,
    pub mean_interval: Option<f64>,
    /// Flagged positions of every correction pass, oldest first
    #[serde(default)]
    pub corrections: Vec<Vec<usize>>,
}

/// Inputs of a sequencing pass borrowed from a session
pub struct Loaded<'a> {
    pub blueprint: &'a PipelineBlueprint,
    pub records: &'a [Record],
    pub open_index: usize,
    pub end_index: usize,
}

impl Session {
    /// Read `path`, or start empty when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no session file, starting empty");
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).map_err(|e| CliError::session_read(path, e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| CliError::session_read(path, e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CliError::session_write(path, e.to_string()))?;
        fs::write(path, json).map_err(|e| CliError::session_write(path, e.to_string()))?;
        debug!(path = %path.display(), "session saved");
        Ok(())
    }

    /// Replace the route; previous ordering and corrections are discarded
    pub fn set_ingested(&mut self, blueprint: PipelineBlueprint, set: IngestedSet) {
        *self = Self {
            blueprint: Some(blueprint),
            records: set.records,
            open_index: Some(set.open_index),
            end_index: Some(set.end_index),
            ..Self::default()
        };
    }

    pub fn set_sequenced(&mut self, plan: SequencePlan) {
        self.forward_bin = plan.forward_bin;
        self.reverse_bin = plan.reverse_bin;
        self.final_list = plan.final_list;
        self.mean_interval = Some(plan.mean_interval);
        self.corrections.clear();
    }

    pub fn set_corrected(&mut self, plan: CorrectionPlan, flagged: Vec<usize>) {
        self.forward_bin = plan.forward_bin;
        self.reverse_bin = plan.reverse_bin;
        self.final_list = plan.final_list;
        self.corrections.push(flagged);
    }

    pub fn loaded(&self) -> Result<Loaded<'_>> {
        match (&self.blueprint, self.open_index, self.end_index) {
            (Some(blueprint), Some(open_index), Some(end_index)) if !self.records.is_empty() => {
                Ok(Loaded {
                    blueprint,
                    records: &self.records,
                    open_index,
                    end_index,
                })
            }
            _ => Err(CliError::NothingLoaded),
        }
    }

    /// Mean interval of the last sequencing pass
    pub fn sequenced(&self) -> Result<f64> {
        match self.mean_interval {
            Some(mean) if !self.final_list.is_empty() => Ok(mean),
            _ => Err(CliError::NotSequenced),
        }
    }

    pub fn blueprint_mut(&mut self) -> Option<&mut PipelineBlueprint> {
        self.blueprint.as_mut()
    }
}
