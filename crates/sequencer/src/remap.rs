//! Bin finalization and canonical time remapping.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use contracts::{ContractError, Record, SequencerConfig};

/// Sort a bin by capture time (stable)
pub fn sort_bin(bin: &mut [Record]) {
    bin.sort_by_key(|record| record.timestamp());
}

/// Close the reverse bin with the end slate and restore time order in both bins
pub fn finalize(forward: &mut [Record], reverse: &mut Vec<Record>, end_slate: Record) {
    reverse.push(end_slate);
    sort_bin(forward);
    sort_bin(reverse);
}

/// Gap inserted between the forward and reverse segments.
///
/// Rounded to whole milliseconds; `None` when it exceeds what `TimeDelta` holds.
pub fn canonical_gap(mean_interval: f64, config: &SequencerConfig) -> Option<TimeDelta> {
    let millis = (config.gap_multiplier * mean_interval * 1000.0).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    TimeDelta::try_milliseconds(millis as i64)
}

/// Re-express both bins on the canonical timeline and concatenate them.
///
/// Forward captures keep their offset from the forward bin's first capture,
/// counted from the canonical open time. Reverse captures keep their offset
/// from the reverse bin's first capture, counted from the last remapped forward
/// capture plus the canonical gap. With an empty forward bin the reverse
/// segment starts at the canonical open time.
pub fn remap(
    forward: &[Record],
    reverse: &[Record],
    mean_interval: f64,
    date: NaiveDate,
    config: &SequencerConfig,
) -> Result<Vec<Record>, ContractError> {
    let open_at = date.and_time(config.canonical_open);
    let mut out = Vec::with_capacity(forward.len() + reverse.len());

    out.extend(shift_segment(forward, open_at)?);

    let reverse_start = match out.last() {
        Some(last) => canonical_gap(mean_interval, config)
            .and_then(|gap| last.timestamp().checked_add_signed(gap))
            .ok_or_else(|| {
                ContractError::timeline_overflow(format!(
                    "gap of {} x {:.1}s after {}",
                    config.gap_multiplier,
                    mean_interval,
                    last.timestamp()
                ))
            })?,
        None => open_at,
    };
    out.extend(shift_segment(reverse, reverse_start)?);

    Ok(out)
}

fn shift_segment(bin: &[Record], start: NaiveDateTime) -> Result<Vec<Record>, ContractError> {
    let Some(first) = bin.first() else {
        return Ok(Vec::new());
    };
    bin.iter()
        .map(|record| {
            let offset = record.seconds_since(first);
            start
                .checked_add_signed(TimeDelta::seconds(offset))
                .map(|ts| record.remapped(ts))
                .ok_or_else(|| {
                    ContractError::timeline_overflow(format!("{offset}s after {start}"))
                })
        })
        .collect()
}
