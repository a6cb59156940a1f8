//! `mark-bad` command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use dispatcher::Dispatcher;
use sequencer::Sequencer;
use tracing::{info, warn};

use crate::cli::MarkBadArgs;
use crate::report;
use crate::session::Session;

use super::ensure_complete;

/// Execute the `mark-bad` command
pub fn run_mark_bad(args: &MarkBadArgs, session: &mut Session, session_path: &Path) -> Result<()> {
    let mean_interval = session.sequenced()?;
    let loaded = session.loaded()?;
    let engine = Sequencer::new(loaded.blueprint.sequencer.clone());

    info!(positions = ?args.positions, "Applying corrections");

    if args.dry_run {
        let plan = engine
            .plan_reorder(
                loaded.records,
                &session.forward_bin,
                &session.reverse_bin,
                loaded.open_index,
                loaded.end_index,
                mean_interval,
                &args.positions,
            )
            .context("Correction failed")?;
        report_rejected(&plan.rejected_positions);
        report::print_ordering(&plan.final_list, plan.forward_bin.len());
        return Ok(());
    }

    let mut sink = Dispatcher::from_config(&loaded.blueprint.output)
        .context("Failed to create output sinks")?;
    let outcome = engine
        .reorder(
            loaded.records,
            &session.forward_bin,
            &session.reverse_bin,
            loaded.open_index,
            loaded.end_index,
            mean_interval,
            &args.positions,
            &mut sink,
        )
        .context("Correction failed")?;

    report_rejected(&outcome.plan.rejected_positions);
    report::print_ordering(&outcome.plan.final_list, outcome.plan.forward_bin.len());
    report::print_sink_report(&outcome.sink_report);

    session.set_corrected(outcome.plan, args.positions.clone());
    session.save(session_path)?;

    ensure_complete(&outcome.sink_report)
}

fn report_rejected(rejected: &[usize]) {
    if rejected.is_empty() {
        return;
    }
    warn!(positions = ?rejected, "Ignored out-of-range positions");
    println!("⚠ Ignored out-of-range positions: {rejected:?}");
}
