//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::{PipelineBlueprint, TimestampSourceConfig};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    jpg_dir: String,
    dng_dir: String,
    output_dir: String,
    timestamps: String,
    strategy: String,
    canonical_open: String,
    gap_multiplier: f64,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(summarize(&blueprint)),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

fn summarize(blueprint: &PipelineBlueprint) -> ConfigSummary {
    let timestamps = match &blueprint.ingest.timestamps {
        TimestampSourceConfig::Manifest { path } => format!("manifest ({})", path.display()),
        TimestampSourceConfig::ModifiedTime => "file modification time".to_string(),
    };
    ConfigSummary {
        version: format!("{:?}", blueprint.version),
        jpg_dir: blueprint.ingest.jpg_dir.display().to_string(),
        dng_dir: blueprint.ingest.dng_dir.display().to_string(),
        output_dir: blueprint.output.dir.display().to_string(),
        timestamps,
        strategy: format!("{:?}", blueprint.sequencer.strategy),
        canonical_open: blueprint.sequencer.canonical_open.to_string(),
        gap_multiplier: blueprint.sequencer.gap_multiplier,
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &PipelineBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if !blueprint.ingest.jpg_dir.is_dir() {
        warnings.push(format!(
            "JPG directory does not exist yet: {}",
            blueprint.ingest.jpg_dir.display()
        ));
    }
    if !blueprint.ingest.dng_dir.is_dir() {
        warnings.push(format!(
            "DNG directory does not exist yet: {}",
            blueprint.ingest.dng_dir.display()
        ));
    }
    if blueprint.output.dir.exists() {
        warnings.push(format!(
            "Output directory {} exists and will be replaced on every sort",
            blueprint.output.dir.display()
        ));
    }
    if blueprint.ingest.timestamps == TimestampSourceConfig::ModifiedTime {
        warnings.push(
            "Capture times come from file modification times - copies may have reset them"
                .to_string(),
        );
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  JPGs: {}", summary.jpg_dir);
            println!("  DNGs: {}", summary.dng_dir);
            println!("  Output: {}", summary.output_dir);
            println!("  Timestamps: {}", summary.timestamps);
            println!("  Strategy: {}", summary.strategy);
            println!("  Canonical open: {}", summary.canonical_open);
            println!("  Gap multiplier: {}", summary.gap_multiplier);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
