//! `load` command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config_loader::ConfigLoader;
use contracts::{
    ConfigVersion, IngestConfig, OutputConfig, PipelineBlueprint, SequencerConfig,
    TimestampSourceConfig,
};
use ingestion::Ingestor;
use tracing::info;

use crate::cli::LoadArgs;
use crate::error::CliError;
use crate::session::Session;

/// Execute the `load` command
pub fn run_load(args: &LoadArgs, session: &mut Session, session_path: &Path) -> Result<()> {
    let (blueprint, base) = build_blueprint(args)?;
    ConfigLoader::validate(&blueprint).context("Invalid route configuration")?;

    info!(
        jpg_dir = %blueprint.ingest.jpg_dir.display(),
        dng_dir = %blueprint.ingest.dng_dir.display(),
        output = %blueprint.output.dir.display(),
        "Loading route"
    );

    let set = Ingestor::from_config(blueprint.ingest.clone(), base.as_deref())
        .context("Failed to prepare timestamp source")?
        .ingest()
        .context("Failed to ingest route")?;

    println!(
        "✓ Loaded {} captures (open: {}, end: {})",
        set.len(),
        set.records[set.open_index].tag(),
        set.records[set.end_index].tag()
    );

    session.set_ingested(blueprint, set);
    session.save(session_path)?;
    Ok(())
}

/// Blueprint from the configuration file and flag overrides, plus the base
/// directory relative manifest paths resolve against
fn build_blueprint(args: &LoadArgs) -> Result<(PipelineBlueprint, Option<PathBuf>)> {
    let (mut blueprint, base) = match &args.config {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::config_not_found(path.display().to_string()).into());
            }
            let blueprint = ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            (blueprint, path.parent().map(Path::to_path_buf))
        }
        None => {
            let jpg_dir = args
                .jpg_dir
                .clone()
                .ok_or_else(|| CliError::missing_input("jpg-dir"))?;
            let dng_dir = args
                .dng_dir
                .clone()
                .ok_or_else(|| CliError::missing_input("dng-dir"))?;
            let dir = args
                .output
                .clone()
                .ok_or_else(|| CliError::missing_input("output"))?;
            let blueprint = PipelineBlueprint {
                version: ConfigVersion::V1,
                ingest: IngestConfig::new(jpg_dir, dng_dir),
                sequencer: SequencerConfig::default(),
                output: OutputConfig {
                    dir,
                    log_summary: true,
                },
            };
            (blueprint, None)
        }
    };

    if let Some(dir) = &args.jpg_dir {
        info!(jpg_dir = %dir.display(), "Overriding JPG directory from CLI");
        blueprint.ingest.jpg_dir = dir.clone();
    }
    if let Some(dir) = &args.dng_dir {
        info!(dng_dir = %dir.display(), "Overriding DNG directory from CLI");
        blueprint.ingest.dng_dir = dir.clone();
    }
    if let Some(dir) = &args.output {
        info!(output = %dir.display(), "Overriding output directory from CLI");
        blueprint.output.dir = dir.clone();
    }
    if let Some(path) = &args.manifest {
        blueprint.ingest.timestamps = TimestampSourceConfig::Manifest { path: path.clone() };
        return Ok((blueprint, None));
    }

    Ok((blueprint, base))
}
