//! Greedy probabilistic assignment of undetermined captures.

use contracts::{AssignmentStrategy, Record};
use observability::RunningStats;
use tracing::trace;

use crate::model::{BinModels, TimingModel};

/// Counters of one assignment pass
#[derive(Debug, Clone, Default)]
pub struct AssignmentSummary {
    /// Captures for which the forward bin scored lower
    pub forward_wins: usize,
    /// Captures for which the reverse bin scored lower (or tied)
    pub reverse_wins: usize,
    /// Captures pushed to the reverse bin without being evaluated
    pub look_ahead: usize,
    /// Winning residuals
    pub residuals: RunningStats,
}

/// Assign every undetermined capture to a bin, in input order.
///
/// The forward bin is compared at the insertion cursor, not at its tail: a
/// capture must follow `forward[fh_marker - 1]`, the record right before the
/// cursor. Seeded forward captures after the cursor are ignored until the
/// cursor passes them. The reverse bin is compared at its tail. The lower
/// standardized residual wins. Models are fixed for the whole pass.
pub fn assign(
    forward: &mut Vec<Record>,
    reverse: &mut Vec<Record>,
    undetermined: &[Record],
    models: &BinModels,
    strategy: AssignmentStrategy,
) -> AssignmentSummary {
    match strategy {
        AssignmentStrategy::LookAhead => assign_look_ahead(forward, reverse, undetermined, models),
        AssignmentStrategy::Pairwise => assign_pairwise(forward, reverse, undetermined, models),
    }
}

/// Residual of `point` immediately following `previous` under `model`.
///
/// No predecessor means the capture cannot follow this bin.
fn residual_after(previous: Option<&Record>, point: &Record, model: &TimingModel) -> f64 {
    previous
        .map(|prev| model.residual(point.seconds_since(prev) as f64))
        .unwrap_or(f64::INFINITY)
}

fn scores(
    forward: &[Record],
    reverse: &[Record],
    fh_marker: usize,
    point: &Record,
    models: &BinModels,
) -> (f64, f64) {
    let forward_residual = residual_after(
        fh_marker.checked_sub(1).and_then(|i| forward.get(i)),
        point,
        &models.forward,
    );
    let reverse_residual = residual_after(reverse.last(), point, &models.reverse);
    (forward_residual, reverse_residual)
}

// The evaluated capture always lands in the forward bin; the one after it is
// consumed unevaluated into the reverse bin. Only insertion positions depend on
// which residual wins.
fn assign_look_ahead(
    forward: &mut Vec<Record>,
    reverse: &mut Vec<Record>,
    undetermined: &[Record],
    models: &BinModels,
) -> AssignmentSummary {
    let mut summary = AssignmentSummary::default();
    let mut fh_marker = 1usize;
    let mut index = 0usize;

    while index < undetermined.len() {
        let point = &undetermined[index];
        let next = undetermined.get(index + 1);
        let (forward_residual, reverse_residual) =
            scores(forward, reverse, fh_marker, point, models);

        trace!(
            tag = %point.tag(),
            forward_residual,
            reverse_residual,
            fh_marker,
            "evaluating capture"
        );

        if forward_residual < reverse_residual {
            summary.forward_wins += 1;
            summary.residuals.push(forward_residual);
            forward.insert(fh_marker.min(forward.len()), point.clone());
            if let Some(next) = next {
                let near_tail = reverse.len().saturating_sub(1);
                reverse.insert(near_tail, next.clone());
            }
        } else {
            summary.reverse_wins += 1;
            summary.residuals.push(reverse_residual);
            forward.push(point.clone());
            if let Some(next) = next {
                reverse.push(next.clone());
            }
        }

        if next.is_some() {
            summary.look_ahead += 1;
        }
        fh_marker += 1;
        index += if next.is_some() { 2 } else { 1 };
    }

    summary
}

fn assign_pairwise(
    forward: &mut Vec<Record>,
    reverse: &mut Vec<Record>,
    undetermined: &[Record],
    models: &BinModels,
) -> AssignmentSummary {
    let mut summary = AssignmentSummary::default();
    let mut fh_marker = 1usize;

    for point in undetermined {
        let (forward_residual, reverse_residual) =
            scores(forward, reverse, fh_marker, point, models);

        if forward_residual < reverse_residual {
            summary.forward_wins += 1;
            summary.residuals.push(forward_residual);
            forward.insert(fh_marker.min(forward.len()), point.clone());
            fh_marker += 1;
        } else {
            summary.reverse_wins += 1;
            summary.residuals.push(reverse_residual);
            reverse.push(point.clone());
        }
    }

    summary
}
