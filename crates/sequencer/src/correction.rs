//! Operator corrections: move flagged captures to the other bin.

use std::collections::BTreeSet;

use contracts::Record;
use tracing::{debug, warn};

use crate::remap::sort_bin;

/// Bin membership after applying corrections
#[derive(Debug, Clone, Default)]
pub struct Membership {
    pub forward: Vec<Record>,
    pub reverse: Vec<Record>,
    /// Positions that were applied, ascending
    pub applied: Vec<usize>,
    /// Positions outside the previous final list
    pub rejected: Vec<usize>,
}

/// Swap every flagged capture into the other bin.
///
/// Positions index the concatenated final list of the previous pass (forward
/// segment first). Duplicates collapse, positions past the end are rejected
/// individually. Both bins come back sorted by capture time.
pub fn apply_corrections(
    forward: &[Record],
    reverse: &[Record],
    bad_positions: &[usize],
) -> Membership {
    let split = forward.len();
    let total = split + reverse.len();

    let flagged: BTreeSet<usize> = bad_positions.iter().copied().collect();
    let (applied, rejected): (Vec<usize>, Vec<usize>) =
        flagged.into_iter().partition(|&pos| pos < total);

    for pos in &rejected {
        warn!(position = pos, len = total, "flagged position out of range, ignored");
    }

    let mut new_forward = forward.to_vec();
    let mut new_reverse = reverse.to_vec();
    let mut drop_forward = Vec::new();
    let mut drop_reverse = Vec::new();

    for &pos in &applied {
        if pos < split {
            new_reverse.push(forward[pos].clone());
            drop_forward.push(pos);
        } else {
            new_forward.push(reverse[pos - split].clone());
            drop_reverse.push(pos - split);
        }
    }

    // moved copies sit past the original range, so descending removal is safe
    for &idx in drop_forward.iter().rev() {
        new_forward.remove(idx);
    }
    for &idx in drop_reverse.iter().rev() {
        new_reverse.remove(idx);
    }

    sort_bin(&mut new_forward);
    sort_bin(&mut new_reverse);

    debug!(
        to_reverse = drop_forward.len(),
        to_forward = drop_reverse.len(),
        rejected = rejected.len(),
        "corrections applied"
    );

    Membership {
        forward: new_forward,
        reverse: new_reverse,
        applied,
        rejected,
    }
}
