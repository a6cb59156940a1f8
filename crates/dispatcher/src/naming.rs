//! Output file naming

use contracts::Record;

/// `{position}_{tag}_new-time={HH-MM-SS}` for the record at `position`
pub fn output_stem(position: usize, record: &Record) -> String {
    format!(
        "{}_{}_new-time={}",
        position,
        record.tag(),
        record.timestamp().format("%H-%M-%S")
    )
}
