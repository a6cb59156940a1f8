//! Deterministic partition of captures around the two slates.

use contracts::Record;
use tracing::{debug, warn};

/// Outcome of the deterministic partition
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Open slate followed by captures stamped after the end slate
    pub forward: Vec<Record>,
    /// Captures stamped before the open slate
    pub reverse: Vec<Record>,
    /// Captures between the slates, in input order
    pub undetermined: Vec<Record>,
    /// Captures sharing a slate's timestamp
    pub dropped: Vec<Record>,
    /// Captures moved from `undetermined` to seed the forward bin
    pub seeded_forward: usize,
    /// Captures moved from `undetermined` to seed the reverse bin
    pub seeded_reverse: usize,
}

/// Split `records` into forward, reverse and undetermined captures.
///
/// The open slate always leads the forward bin. The end slate is left out; it
/// joins the reverse bin once assignment is over. A bin holding nothing but its
/// anchor is seeded from the undetermined captures (first half to forward,
/// second half to reverse) so that both bins have intervals to fit.
///
/// `open_index` and `end_index` must be distinct and in range.
pub fn partition(records: &[Record], open_index: usize, end_index: usize) -> Partition {
    let open = &records[open_index];
    let end = &records[end_index];

    let mut result = Partition {
        forward: vec![open.clone()],
        ..Default::default()
    };

    for (index, record) in records.iter().enumerate() {
        if index == open_index || index == end_index {
            continue;
        }

        let ts = record.timestamp();
        if ts == open.timestamp() || ts == end.timestamp() {
            warn!(tag = %record.tag(), timestamp = %ts, "capture shares a slate timestamp, dropped");
            result.dropped.push(record.clone());
        } else if ts > end.timestamp() {
            result.forward.push(record.clone());
        } else if ts < open.timestamp() {
            result.reverse.push(record.clone());
        } else {
            result.undetermined.push(record.clone());
        }
    }

    seed_empty_bins(&mut result);

    debug!(
        forward = result.forward.len(),
        reverse = result.reverse.len(),
        undetermined = result.undetermined.len(),
        dropped = result.dropped.len(),
        "partition complete"
    );

    result
}

fn seed_empty_bins(partition: &mut Partition) {
    let forward_empty = partition.forward.len() < 2;
    let reverse_empty = partition.reverse.is_empty();
    if !forward_empty && !reverse_empty {
        return;
    }

    let mid = partition.undetermined.len() / 2;
    let second_half = partition.undetermined.split_off(mid);
    let first_half = std::mem::take(&mut partition.undetermined);

    if forward_empty {
        partition.seeded_forward = first_half.len();
        partition.forward.extend(first_half);
    } else {
        partition.undetermined.extend(first_half);
    }

    if reverse_empty {
        partition.seeded_reverse = second_half.len();
        partition.reverse.extend(second_half);
    } else {
        partition.undetermined.extend(second_half);
    }

    debug!(
        seeded_forward = partition.seeded_forward,
        seeded_reverse = partition.seeded_reverse,
        "seeded empty bins from undetermined captures"
    );
}
