//! Sequencing engine: partition, fit, assign, remap, dispatch.

use chrono::{NaiveDate, NaiveDateTime};
use contracts::{ContractError, Record, RecordSink, SequencerConfig, SinkReport};
use observability::StatsSummary;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::assign::assign;
use crate::correction::apply_corrections;
use crate::model::BinModels;
use crate::partition::partition;
use crate::remap::{finalize, remap};

/// In-memory result of a sequencing pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequencePlan {
    /// Forward bin, sorted, original capture times
    pub forward_bin: Vec<Record>,
    /// Reverse bin (end slate included), sorted, original capture times
    pub reverse_bin: Vec<Record>,
    /// Forward then reverse, on the canonical timeline
    pub final_list: Vec<Record>,
    /// Pooled mean interval (seconds), reused by corrections
    pub mean_interval: f64,
    pub diagnostics: Diagnostics,
}

/// Sequencing pass written to a sink
#[derive(Debug, Clone)]
pub struct SequenceOutcome {
    pub plan: SequencePlan,
    pub sink_report: SinkReport,
}

/// In-memory result of a correction pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionPlan {
    pub forward_bin: Vec<Record>,
    pub reverse_bin: Vec<Record>,
    pub final_list: Vec<Record>,
    /// Flagged positions that were applied
    pub applied_positions: Vec<usize>,
    /// Flagged positions outside the previous final list
    pub rejected_positions: Vec<usize>,
    pub diagnostics: Diagnostics,
}

/// Correction pass written to a sink
#[derive(Debug, Clone)]
pub struct CorrectionOutcome {
    pub plan: CorrectionPlan,
    pub sink_report: SinkReport,
}

/// Diagnostic figures of a pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Fitted models (absent for corrections, which reuse the mean interval)
    pub models: Option<BinModels>,
    /// Timestamp of the last capture after remapping
    pub achieved_end: Option<NaiveDateTime>,
    /// Reference end of the route, for comparison only
    pub reference_end: Option<NaiveDateTime>,
    /// Captures dropped for sharing a slate's timestamp
    pub dropped: usize,
    /// Captures moved to seed empty bins
    pub seeded: usize,
    /// Captures pushed to the reverse bin without evaluation
    pub look_ahead: usize,
    #[serde(skip)]
    pub residuals: Option<StatsSummary>,
}

impl Diagnostics {
    /// Seconds between achieved and reference end (positive = later)
    pub fn end_drift_s(&self) -> Option<i64> {
        match (self.achieved_end, self.reference_end) {
            (Some(achieved), Some(reference)) => Some((achieved - reference).num_seconds()),
            _ => None,
        }
    }
}

/// Statistical sequencing engine
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    config: SequencerConfig,
}

impl Sequencer {
    /// Create a new engine with the given configuration
    pub fn new(config: SequencerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Order `records` and write the result to `sink` once.
    ///
    /// The sink only runs after the whole ordering exists in memory.
    #[instrument(
        name = "sequencer_sequence",
        skip(self, records, sink),
        fields(records = records.len(), sink = sink.name())
    )]
    pub fn sequence(
        &self,
        records: &[Record],
        open_index: usize,
        end_index: usize,
        sink: &mut dyn RecordSink,
    ) -> Result<SequenceOutcome, ContractError> {
        let plan = self.plan(records, open_index, end_index)?;
        let sink_report = dispatch(sink, &plan.final_list)?;
        Ok(SequenceOutcome { plan, sink_report })
    }

    /// Compute the ordering without touching any sink
    pub fn plan(
        &self,
        records: &[Record],
        open_index: usize,
        end_index: usize,
    ) -> Result<SequencePlan, ContractError> {
        check_anchors(records, open_index, end_index)?;

        let parts = partition(records, open_index, end_index);
        let models = BinModels::fit(&parts.forward, &parts.reverse, &self.config.fallback);

        let mut forward = parts.forward;
        let mut reverse = parts.reverse;
        let summary = assign(
            &mut forward,
            &mut reverse,
            &parts.undetermined,
            &models,
            self.config.strategy,
        );

        finalize(&mut forward, &mut reverse, records[end_index].clone());

        let mean_interval = models.combined.mean_s;
        let date = base_date(records, open_index);
        let final_list = remap(&forward, &reverse, mean_interval, date, &self.config)?;

        let diagnostics = Diagnostics {
            models: Some(models),
            achieved_end: final_list.last().map(Record::timestamp),
            reference_end: Some(date.and_time(self.config.reference_end)),
            dropped: parts.dropped.len(),
            seeded: parts.seeded_forward + parts.seeded_reverse,
            look_ahead: summary.look_ahead,
            residuals: Some(StatsSummary::from(&summary.residuals)),
        };

        info!(
            forward = forward.len(),
            reverse = reverse.len(),
            mean_interval,
            strategy = ?self.config.strategy,
            achieved_end = ?diagnostics.achieved_end,
            reference_end = ?diagnostics.reference_end,
            "sequencing pass complete"
        );
        observability::record_sequence_pass(
            forward.len(),
            reverse.len(),
            models.fallback_count(),
        );

        Ok(SequencePlan {
            forward_bin: forward,
            reverse_bin: reverse,
            final_list,
            mean_interval,
            diagnostics,
        })
    }

    /// Move flagged captures to the other bin, remap and write to `sink` once.
    ///
    /// The timing model is not refit: `mean_interval` from the original pass
    /// sizes the gap again.
    #[allow(clippy::too_many_arguments)]
    #[instrument(
        name = "sequencer_reorder",
        skip(self, records, forward_bin, reverse_bin, sink),
        fields(flagged = bad_positions.len(), sink = sink.name())
    )]
    pub fn reorder(
        &self,
        records: &[Record],
        forward_bin: &[Record],
        reverse_bin: &[Record],
        open_index: usize,
        end_index: usize,
        mean_interval: f64,
        bad_positions: &[usize],
        sink: &mut dyn RecordSink,
    ) -> Result<CorrectionOutcome, ContractError> {
        let plan = self.plan_reorder(
            records,
            forward_bin,
            reverse_bin,
            open_index,
            end_index,
            mean_interval,
            bad_positions,
        )?;
        let sink_report = dispatch(sink, &plan.final_list)?;
        Ok(CorrectionOutcome { plan, sink_report })
    }

    /// Compute a corrected ordering without touching any sink
    #[allow(clippy::too_many_arguments)]
    pub fn plan_reorder(
        &self,
        records: &[Record],
        forward_bin: &[Record],
        reverse_bin: &[Record],
        open_index: usize,
        end_index: usize,
        mean_interval: f64,
        bad_positions: &[usize],
    ) -> Result<CorrectionPlan, ContractError> {
        check_anchors(records, open_index, end_index)?;
        if forward_bin.is_empty() && reverse_bin.is_empty() {
            return Err(ContractError::EmptyRecordSet);
        }

        let membership = apply_corrections(forward_bin, reverse_bin, bad_positions);
        if membership.forward.is_empty() || membership.reverse.is_empty() {
            warn!(
                forward = membership.forward.len(),
                reverse = membership.reverse.len(),
                "correction emptied a bin"
            );
        }

        let date = base_date(records, open_index);
        let final_list = remap(
            &membership.forward,
            &membership.reverse,
            mean_interval,
            date,
            &self.config,
        )?;

        let diagnostics = Diagnostics {
            achieved_end: final_list.last().map(Record::timestamp),
            reference_end: Some(date.and_time(self.config.reference_end)),
            ..Default::default()
        };

        info!(
            applied = membership.applied.len(),
            rejected = membership.rejected.len(),
            forward = membership.forward.len(),
            reverse = membership.reverse.len(),
            "correction pass complete"
        );
        observability::record_correction_pass(
            membership.applied.len(),
            membership.rejected.len(),
        );

        Ok(CorrectionPlan {
            forward_bin: membership.forward,
            reverse_bin: membership.reverse,
            final_list,
            applied_positions: membership.applied,
            rejected_positions: membership.rejected,
            diagnostics,
        })
    }
}

fn check_anchors(
    records: &[Record],
    open_index: usize,
    end_index: usize,
) -> Result<(), ContractError> {
    if records.is_empty() {
        return Err(ContractError::EmptyRecordSet);
    }
    if open_index == end_index || open_index >= records.len() || end_index >= records.len() {
        return Err(ContractError::InvalidAnchors {
            open_index,
            end_index,
            len: records.len(),
        });
    }
    Ok(())
}

/// Calendar day the canonical timeline is laid on
fn base_date(records: &[Record], open_index: usize) -> NaiveDate {
    records[open_index].timestamp_old().date()
}

fn dispatch(sink: &mut dyn RecordSink, final_list: &[Record]) -> Result<SinkReport, ContractError> {
    let report = sink.write(final_list)?;
    if !report.is_complete() {
        warn!(
            sink = sink.name(),
            failed = report.failures.len(),
            written = report.written.len(),
            "sink finished with failures"
        );
    }
    Ok(report)
}
