//! Configuration validation
//!
//! Rules:
//! - sequencer numbers are positive (field attributes)
//! - reference_end is after canonical_open
//! - slate markers are non-empty and distinct
//! - asset extensions are non-empty and distinct
//! - manifest path is set when a manifest is used
//! - the output tree neither is, contains, nor sits inside an input directory

use contracts::{paths_overlap, ContractError, PipelineBlueprint, TimestampSourceConfig};
use validator::Validate;

/// Validate a PipelineBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    validate_sequencer(blueprint)?;
    validate_markers(blueprint)?;
    validate_extensions(blueprint)?;
    validate_timestamps(blueprint)?;
    validate_output(blueprint)?;
    Ok(())
}

fn validate_sequencer(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    let seq = &blueprint.sequencer;
    seq.validate()
        .map_err(|e| ContractError::config_validation("sequencer", e.to_string()))?;

    if seq.reference_end <= seq.canonical_open {
        return Err(ContractError::config_validation(
            "sequencer.reference_end",
            format!(
                "reference_end ({}) must be after canonical_open ({})",
                seq.reference_end, seq.canonical_open
            ),
        ));
    }
    Ok(())
}

fn validate_markers(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    let ingest = &blueprint.ingest;
    for (field, value) in [
        ("ingest.open_marker", &ingest.open_marker),
        ("ingest.end_marker", &ingest.end_marker),
    ] {
        if value.trim().is_empty() {
            return Err(ContractError::config_validation(
                field,
                "slate marker cannot be empty",
            ));
        }
    }

    if ingest.open_marker.eq_ignore_ascii_case(&ingest.end_marker) {
        return Err(ContractError::config_validation(
            "ingest.open_marker / ingest.end_marker",
            format!(
                "slate markers must be distinct, both are '{}'",
                ingest.open_marker
            ),
        ));
    }
    Ok(())
}

fn validate_extensions(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    let ingest = &blueprint.ingest;
    let primary = ingest.primary_extension.trim_start_matches('.');
    let linked = ingest.linked_extension.trim_start_matches('.');

    if primary.is_empty() || linked.is_empty() {
        return Err(ContractError::config_validation(
            "ingest.primary_extension / ingest.linked_extension",
            "extension cannot be empty",
        ));
    }
    if primary.eq_ignore_ascii_case(linked) {
        return Err(ContractError::config_validation(
            "ingest.primary_extension / ingest.linked_extension",
            format!("extensions must be distinct, both are '{primary}'"),
        ));
    }
    Ok(())
}

fn validate_timestamps(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    if let TimestampSourceConfig::Manifest { path } = &blueprint.ingest.timestamps {
        if path.as_os_str().is_empty() {
            return Err(ContractError::config_validation(
                "ingest.timestamps.path",
                "manifest path cannot be empty",
            ));
        }
    }
    Ok(())
}

fn validate_output(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    let out = &blueprint.output.dir;
    if out.as_os_str().is_empty() {
        return Err(ContractError::config_validation(
            "output.dir",
            "output directory cannot be empty",
        ));
    }
    // the output tree is deleted on every write
    for input in [&blueprint.ingest.jpg_dir, &blueprint.ingest.dng_dir] {
        if paths_overlap(out, input) {
            return Err(ContractError::config_validation(
                "output.dir",
                format!(
                    "output directory '{}' would overwrite an input directory '{}'",
                    out.display(),
                    input.display()
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use contracts::{ConfigVersion, IngestConfig, OutputConfig, SequencerConfig};

    fn minimal_blueprint() -> PipelineBlueprint {
        PipelineBlueprint {
            version: ConfigVersion::V1,
            ingest: IngestConfig::new("/r/jpg", "/r/dng"),
            sequencer: SequencerConfig::default(),
            output: OutputConfig {
                dir: "/r/sorted".into(),
                log_summary: true,
            },
        }
    }

    #[test]
    fn test_valid_config() {
        let bp = minimal_blueprint();
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_non_positive_gap_multiplier() {
        let mut bp = minimal_blueprint();
        bp.sequencer.gap_multiplier = 0.0;
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("gap_multiplier"), "got: {err}");
    }

    #[test]
    fn test_non_positive_fallback() {
        let mut bp = minimal_blueprint();
        bp.sequencer.fallback.std_s = -1.0;
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("sequencer"), "got: {err}");
    }

    #[test]
    fn test_reference_end_before_open() {
        let mut bp = minimal_blueprint();
        bp.sequencer.reference_end = NaiveTime::from_hms_opt(5, 0, 0).unwrap();
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("must be after canonical_open"), "got: {err}");
    }

    #[test]
    fn test_empty_marker() {
        let mut bp = minimal_blueprint();
        bp.ingest.end_marker = "  ".into();
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("cannot be empty"), "got: {err}");
    }

    #[test]
    fn test_same_extensions() {
        let mut bp = minimal_blueprint();
        bp.ingest.linked_extension = ".JPG".into();
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("extensions must be distinct"), "got: {err}");
    }

    #[test]
    fn test_empty_manifest_path() {
        let mut bp = minimal_blueprint();
        bp.ingest.timestamps = TimestampSourceConfig::Manifest {
            path: Default::default(),
        };
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("manifest path"), "got: {err}");
    }

    #[test]
    fn test_output_overwrites_input() {
        let mut bp = minimal_blueprint();
        bp.output.dir = "/r/dng".into();
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("overwrite an input"), "got: {err}");
    }

    #[test]
    fn test_output_containing_inputs_rejected() {
        let mut bp = minimal_blueprint();
        bp.output.dir = "/r".into();
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("overwrite an input"), "got: {err}");
    }

    #[test]
    fn test_output_inside_input_rejected() {
        let mut bp = minimal_blueprint();
        bp.output.dir = "/r/jpg/sorted".into();
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("'/r/jpg'"), "got: {err}");
    }

    #[test]
    fn test_output_alias_of_input_rejected() {
        let mut bp = minimal_blueprint();
        bp.output.dir = "/r/sorted/../dng/".into();
        assert!(validate(&bp).is_err());
    }

    #[test]
    fn test_output_sibling_of_inputs_accepted() {
        let mut bp = minimal_blueprint();
        bp.output.dir = "/r/jpg-sorted".into();
        assert!(validate(&bp).is_ok());
    }
}
