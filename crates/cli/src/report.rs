//! Console output for orderings and sink reports.

use contracts::{Record, SinkReport};
use sequencer::Diagnostics;
use serde::Serialize;

/// One line of an ordering
#[derive(Debug, Serialize)]
pub struct OrderingRow {
    pub position: usize,
    pub tag: String,
    pub bin: &'static str,
    pub new_time: String,
    pub capture_time: String,
}

/// Rows of a final list whose first `forward_len` entries are the forward bin
pub fn ordering_rows(final_list: &[Record], forward_len: usize) -> Vec<OrderingRow> {
    final_list
        .iter()
        .enumerate()
        .map(|(position, record)| OrderingRow {
            position,
            tag: record.tag(),
            bin: if position < forward_len {
                "forward"
            } else {
                "reverse"
            },
            new_time: record.timestamp().format("%H:%M:%S").to_string(),
            capture_time: record.timestamp_old().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect()
}

pub fn print_ordering(final_list: &[Record], forward_len: usize) {
    println!("\n  {:>4}  {:<8} {:<8}  {:<19}  tag", "pos", "bin", "new", "captured");
    for row in ordering_rows(final_list, forward_len) {
        println!(
            "  {:>4}  {:<8} {:<8}  {:<19}  {}",
            row.position, row.bin, row.new_time, row.capture_time, row.tag
        );
    }
    println!();
}

pub fn print_bin(name: &str, bin: &[Record]) {
    println!("\n{name} bin ({})", bin.len());
    for (idx, record) in bin.iter().enumerate() {
        let prefix = if idx + 1 == bin.len() { "└─" } else { "├─" };
        println!(
            "   {} {} ({})",
            prefix,
            record.tag(),
            record.timestamp_old().format("%H:%M:%S")
        );
    }
}

pub fn print_diagnostics(mean_interval: Option<f64>, diagnostics: &Diagnostics) {
    println!("\nSequencing");
    if let Some(mean) = mean_interval {
        println!("   ├─ Mean interval: {mean:.1}s");
    }
    if let Some(models) = &diagnostics.models {
        println!(
            "   ├─ Forward model: {:.1}s ± {:.1}s{}",
            models.forward.mean_s,
            models.forward.std_s,
            fallback_marker(models.forward.fallback)
        );
        println!(
            "   ├─ Reverse model: {:.1}s ± {:.1}s{}",
            models.reverse.mean_s,
            models.reverse.std_s,
            fallback_marker(models.reverse.fallback)
        );
    }
    if let Some(residuals) = &diagnostics.residuals {
        println!("   ├─ Winning residuals: {residuals}");
    }
    if diagnostics.dropped > 0 {
        println!("   ├─ Dropped (slate time): {}", diagnostics.dropped);
    }
    if diagnostics.seeded > 0 {
        println!("   ├─ Seeded into empty bins: {}", diagnostics.seeded);
    }
    if diagnostics.look_ahead > 0 {
        println!("   ├─ Look-ahead placements: {}", diagnostics.look_ahead);
    }
    match (diagnostics.achieved_end, diagnostics.reference_end) {
        (Some(achieved), Some(reference)) => println!(
            "   └─ End: {} (reference {}, drift {}s)",
            achieved.format("%H:%M:%S"),
            reference.format("%H:%M:%S"),
            diagnostics.end_drift_s().unwrap_or_default()
        ),
        _ => println!("   └─ End: n/a"),
    }
}

pub fn print_sink_report(report: &SinkReport) {
    println!(
        "\nOutput '{}': {} file(s) written, {} failure(s)",
        report.sink_name,
        report.written.len(),
        report.failures.len()
    );
    for failure in &report.failures {
        println!(
            "   ✗ {} -> {}: {}",
            failure.source.display(),
            failure.destination.display(),
            failure.message
        );
    }
}

fn fallback_marker(fallback: bool) -> &'static str {
    if fallback {
        " (fallback)"
    } else {
        ""
    }
}
