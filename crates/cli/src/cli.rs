//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// PPS Sequencer - chronological reordering of PPS route captures
#[derive(Parser, Debug)]
#[command(
    name = "pps-sequencer",
    author,
    version,
    about = "Reorder PPS route photos whose camera timestamps cannot be trusted",
    long_about = "Reconstructs the capture order of a PPS route from its open and end slates.\n\n\
                  Loads JPG/DNG pairs, partitions them around the slates, assigns the \n\
                  remaining captures with per-bin timing models and writes renamed copies \n\
                  on a canonical timeline. Misplaced captures can be flagged and re-sorted."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "PPS_SEQUENCER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "PPS_SEQUENCER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Session file carrying state between commands
    #[arg(
        long,
        default_value = "session.json",
        global = true,
        env = "PPS_SEQUENCER_SESSION"
    )]
    pub session: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest a route and start a new session
    Load(LoadArgs),

    /// Sequence the loaded route and write the output tree
    Sort(SortArgs),

    /// Flag misplaced positions of the last ordering and re-sort
    MarkBad(MarkBadArgs),

    /// Print the current ordering
    Show(ShowArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),
}

/// Arguments for the `load` command
#[derive(Parser, Debug, Clone)]
pub struct LoadArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "PPS_SEQUENCER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the JPG captures (overrides configuration)
    #[arg(long, env = "PPS_JPG_DIR")]
    pub jpg_dir: Option<PathBuf>,

    /// Directory holding the DNG captures (overrides configuration)
    #[arg(long, env = "PPS_DNG_DIR")]
    pub dng_dir: Option<PathBuf>,

    /// Output tree root (overrides configuration)
    #[arg(short, long, env = "PPS_OUTPUT_DIR")]
    pub output: Option<PathBuf>,

    /// Timestamp manifest mapping stem to capture time (TOML or JSON)
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

/// Arguments for the `sort` command
#[derive(Parser, Debug, Clone)]
pub struct SortArgs {
    /// Assignment strategy (overrides configuration)
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Compute and print the ordering without writing files or the session
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `mark-bad` command
#[derive(Parser, Debug, Clone)]
pub struct MarkBadArgs {
    /// 0-based positions in the last ordering (comma separated)
    #[arg(short, long, value_delimiter = ',', num_args = 1.., required = true)]
    pub positions: Vec<usize>,

    /// Compute and print the ordering without writing files or the session
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show both bins instead of the final list
    #[arg(long)]
    pub bins: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "route.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

/// Assignment strategy
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StrategyArg {
    /// Winner takes the capture, the next one goes to the reverse bin unevaluated
    LookAhead,
    /// Every capture is evaluated on its own
    Pairwise,
}

impl From<StrategyArg> for contracts::AssignmentStrategy {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::LookAhead => Self::LookAhead,
            StrategyArg::Pairwise => Self::Pairwise,
        }
    }
}
