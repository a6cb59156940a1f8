//! `sort` command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use dispatcher::Dispatcher;
use sequencer::Sequencer;
use tracing::info;

use crate::cli::SortArgs;
use crate::report;
use crate::session::Session;

use super::ensure_complete;

/// Execute the `sort` command
pub fn run_sort(args: &SortArgs, session: &mut Session, session_path: &Path) -> Result<()> {
    let loaded = session.loaded()?;

    let mut config = loaded.blueprint.sequencer.clone();
    if let Some(strategy) = args.strategy {
        info!(strategy = ?strategy, "Overriding assignment strategy from CLI");
        config.strategy = strategy.into();
    }
    let engine = Sequencer::new(config.clone());

    if args.dry_run {
        let plan = engine
            .plan(loaded.records, loaded.open_index, loaded.end_index)
            .context("Sequencing failed")?;
        info!("Dry run mode - nothing written");
        report::print_diagnostics(Some(plan.mean_interval), &plan.diagnostics);
        report::print_ordering(&plan.final_list, plan.forward_bin.len());
        return Ok(());
    }

    let mut sink = Dispatcher::from_config(&loaded.blueprint.output)
        .context("Failed to create output sinks")?;
    let outcome = engine
        .sequence(loaded.records, loaded.open_index, loaded.end_index, &mut sink)
        .context("Sequencing failed")?;

    report::print_diagnostics(Some(outcome.plan.mean_interval), &outcome.plan.diagnostics);
    report::print_ordering(&outcome.plan.final_list, outcome.plan.forward_bin.len());
    report::print_sink_report(&outcome.sink_report);

    if let Some(blueprint) = session.blueprint_mut() {
        blueprint.sequencer = config;
    }
    session.set_sequenced(outcome.plan);
    session.save(session_path)?;

    ensure_complete(&outcome.sink_report)
}
