//! `show` command implementation.

use anyhow::{Context, Result};

use crate::cli::ShowArgs;
use crate::report;
use crate::session::Session;

/// Execute the `show` command
pub fn run_show(args: &ShowArgs, session: &Session) -> Result<()> {
    session.sequenced()?;

    if args.json {
        let json = if args.bins {
            serde_json::to_string_pretty(&serde_json::json!({
                "forward_bin": session.forward_bin,
                "reverse_bin": session.reverse_bin,
            }))
        } else {
            serde_json::to_string_pretty(&report::ordering_rows(
                &session.final_list,
                session.forward_bin.len(),
            ))
        }
        .context("Failed to serialize ordering")?;
        println!("{json}");
        return Ok(());
    }

    if args.bins {
        report::print_bin("Forward", &session.forward_bin);
        report::print_bin("Reverse", &session.reverse_bin);
        println!();
    } else {
        report::print_ordering(&session.final_list, session.forward_bin.len());
    }

    if !session.corrections.is_empty() {
        println!("Corrections applied: {}", session.corrections.len());
        for (idx, flagged) in session.corrections.iter().enumerate() {
            println!("   {}. {:?}", idx + 1, flagged);
        }
    }
    Ok(())
}
