//! Command implementations.

mod load;
mod mark_bad;
mod show;
mod sort;
mod validate;

pub use load::run_load;
pub use mark_bad::run_mark_bad;
pub use show::run_show;
pub use sort::run_sort;
pub use validate::run_validate;

use anyhow::Result;
use contracts::SinkReport;

use crate::error::CliError;

/// Turn per-file copy failures into a command failure once they are printed
fn ensure_complete(report: &SinkReport) -> Result<()> {
    if report.is_complete() {
        Ok(())
    } else {
        Err(CliError::IncompleteOutput {
            sink: report.sink_name.clone(),
            failed: report.failures.len(),
        }
        .into())
    }
}
