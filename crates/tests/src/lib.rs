//! # Integration Tests
//!
//! Integration and end-to-end tests.
//!
//! Covers:
//! - Contract smoke tests
//! - Ingest -> sequence -> file output -> correction on a temporary route

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
        assert_eq!(
            contracts::SequencerConfig::default().strategy,
            contracts::AssignmentStrategy::LookAhead
        );
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{ContractError, IngestConfig, Record, TimestampSourceConfig};
    use dispatcher::{Dispatcher, FileSink, FileSinkConfig};
    use ingestion::{IngestionError, Ingestor};
    use sequencer::{Sequencer, SequencerConfig};
    use tempfile::{tempdir, TempDir};

    /// Temporary route: `jpg/`, `dng/` and a manifest of capture times
    struct Route {
        root: TempDir,
    }

    impl Route {
        fn new(captures: &[(&str, &str)]) -> Self {
            let root = tempdir().unwrap();
            fs::create_dir_all(root.path().join("jpg")).unwrap();
            fs::create_dir_all(root.path().join("dng")).unwrap();

            let mut manifest = String::new();
            for (stem, time) in captures {
                fs::write(root.path().join("jpg").join(format!("{stem}.jpg")), stem).unwrap();
                fs::write(root.path().join("dng").join(format!("{stem}.dng")), stem).unwrap();
                manifest.push_str(&format!("{stem} = \"2023-06-14 {time}\"\n"));
            }
            fs::write(root.path().join("times.toml"), manifest).unwrap();
            Self { root }
        }

        fn path(&self) -> &Path {
            self.root.path()
        }

        fn ingest_config(&self) -> IngestConfig {
            let mut config = IngestConfig::new(self.path().join("jpg"), self.path().join("dng"));
            config.timestamps = TimestampSourceConfig::Manifest {
                path: self.path().join("times.toml"),
            };
            config
        }

        fn output(&self) -> PathBuf {
            self.path().join("sorted")
        }

        fn output_names(&self, sub: &str) -> Vec<String> {
            let mut names: Vec<String> = fs::read_dir(self.output().join(sub))
                .unwrap()
                .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            names.sort_by_key(|name| {
                name.split('_')
                    .next()
                    .and_then(|pos| pos.parse::<usize>().ok())
                    .unwrap_or(usize::MAX)
            });
            names
        }
    }

    /// Open at 05:50, three captures, end at 07:10
    fn five_captures() -> Route {
        Route::new(&[
            ("A_open", "05:50:00"),
            ("B", "06:05:00"),
            ("C", "06:20:00"),
            ("D", "07:00:00"),
            ("E_end", "07:10:00"),
        ])
    }

    fn tags(records: &[Record]) -> Vec<String> {
        records.iter().map(Record::tag).collect()
    }

    fn times(records: &[Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.timestamp().format("%H:%M:%S").to_string())
            .collect()
    }

    /// End-to-end: manifest route -> Ingestor -> Sequencer -> FileSink
    ///
    /// Both captures between the slates seed the empty bins, the remapped
    /// reverse segment starts six mean intervals after the forward one.
    #[test]
    fn test_e2e_five_capture_route() {
        let route = five_captures();
        let set = Ingestor::from_config(route.ingest_config(), None)
            .unwrap()
            .ingest()
            .unwrap();
        assert_eq!(tags(&set.records), vec!["A_open", "B", "C", "D", "E_end"]);
        assert_eq!((set.open_index, set.end_index), (0, 4));

        let engine = Sequencer::new(SequencerConfig::default());
        let mut sink = FileSink::new("files", FileSinkConfig::new(route.output()));
        let outcome = engine
            .sequence(&set.records, set.open_index, set.end_index, &mut sink)
            .unwrap();
        let plan = &outcome.plan;

        assert_eq!(tags(&plan.forward_bin), vec!["A_open", "B"]);
        assert_eq!(tags(&plan.reverse_bin), vec!["C", "D", "E_end"]);
        assert_eq!(plan.mean_interval, 1650.0);

        assert_eq!(plan.final_list[0].tag(), "A_open");
        assert_eq!(
            times(&plan.final_list),
            vec!["06:01:00", "06:16:00", "09:01:00", "09:41:00", "09:51:00"]
        );
        let gap = plan.final_list[2].timestamp() - plan.final_list[1].timestamp();
        assert_eq!(gap.num_seconds(), 6 * 1650);

        // capture times survive the remap
        assert_eq!(
            plan.final_list[3].timestamp_old().format("%H:%M").to_string(),
            "07:00"
        );

        assert!(outcome.sink_report.is_complete());
        assert_eq!(outcome.sink_report.written.len(), 10);
        assert_eq!(
            route.output_names("jpgs"),
            vec![
                "0_A_open_new-time=06-01-00.jpg",
                "1_B_new-time=06-16-00.jpg",
                "2_C_new-time=09-01-00.jpg",
                "3_D_new-time=09-41-00.jpg",
                "4_E_end_new-time=09-51-00.jpg",
            ]
        );
        assert_eq!(route.output_names("dngs")[4], "4_E_end_new-time=09-51-00.dng");
        assert_eq!(
            fs::read_to_string(route.output().join("jpgs/3_D_new-time=09-41-00.jpg")).unwrap(),
            "D"
        );
    }

    /// Correction moves B to the reverse bin and replaces the whole output tree
    #[test]
    fn test_e2e_correction_rewrites_output() {
        let route = five_captures();
        let set = Ingestor::from_config(route.ingest_config(), None)
            .unwrap()
            .ingest()
            .unwrap();

        let engine = Sequencer::new(SequencerConfig::default());
        let mut sink = FileSink::new("files", FileSinkConfig::new(route.output()));
        let first = engine
            .sequence(&set.records, set.open_index, set.end_index, &mut sink)
            .unwrap();

        let corrected = engine
            .reorder(
                &set.records,
                &first.plan.forward_bin,
                &first.plan.reverse_bin,
                set.open_index,
                set.end_index,
                first.plan.mean_interval,
                &[1, 42],
                &mut sink,
            )
            .unwrap();
        let plan = &corrected.plan;

        assert_eq!(plan.applied_positions, vec![1]);
        assert_eq!(plan.rejected_positions, vec![42]);
        assert_eq!(tags(&plan.forward_bin), vec!["A_open"]);
        assert_eq!(tags(&plan.reverse_bin), vec!["B", "C", "D", "E_end"]);
        assert_eq!(
            times(&plan.final_list),
            vec!["06:01:00", "08:46:00", "09:01:00", "09:41:00", "09:51:00"]
        );

        let names = route.output_names("jpgs");
        assert_eq!(names.len(), 5);
        assert_eq!(names[1], "1_B_new-time=08-46-00.jpg");
        assert!(!route
            .output()
            .join("jpgs/1_B_new-time=06-16-00.jpg")
            .exists());
    }

    /// Empty flag set keeps membership and reproduces the same ordering
    #[test]
    fn test_e2e_empty_correction_is_idempotent() {
        let route = Route::new(&[
            ("PPS_0001", "06:03:00"),
            ("PPS_0002", "07:04:00"),
            ("PPS_0003", "06:06:00"),
            ("PPS_0004", "07:07:00"),
            ("PPS_0005", "05:31:00"),
            ("PPS_END", "06:30:00"),
            ("PPS_OPEN", "06:00:00"),
        ]);
        let set = Ingestor::from_config(route.ingest_config(), None)
            .unwrap()
            .ingest()
            .unwrap();

        let engine = Sequencer::new(SequencerConfig::default());
        let mut sink = FileSink::new("files", FileSinkConfig::new(route.output()));
        let first = engine
            .sequence(&set.records, set.open_index, set.end_index, &mut sink)
            .unwrap();
        let again = engine
            .reorder(
                &set.records,
                &first.plan.forward_bin,
                &first.plan.reverse_bin,
                set.open_index,
                set.end_index,
                first.plan.mean_interval,
                &[],
                &mut sink,
            )
            .unwrap();

        assert_eq!(tags(&again.plan.forward_bin), tags(&first.plan.forward_bin));
        assert_eq!(tags(&again.plan.reverse_bin), tags(&first.plan.reverse_bin));
        assert_eq!(again.plan.final_list, first.plan.final_list);

        // every non-slate capture lands in exactly one bin
        let mut all = tags(&first.plan.forward_bin);
        all.extend(tags(&first.plan.reverse_bin));
        all.sort();
        assert_eq!(
            all,
            vec![
                "PPS_0001", "PPS_0002", "PPS_0003", "PPS_0004", "PPS_0005", "PPS_END",
                "PPS_OPEN"
            ]
        );
        assert_eq!(route.output_names("jpgs").len(), 7);
    }

    /// 10 JPGs against 9 DNGs never reach the sequencer
    #[test]
    fn test_e2e_mismatched_assets_rejected() {
        let mut captures: Vec<(String, String)> = (1..=8)
            .map(|i| (format!("PPS_{i:04}"), format!("06:{:02}:00", 10 + i)))
            .collect();
        captures.push(("PPS_OPEN".into(), "06:00:00".into()));
        captures.push(("PPS_END".into(), "07:00:00".into()));
        let borrowed: Vec<(&str, &str)> = captures
            .iter()
            .map(|(s, t)| (s.as_str(), t.as_str()))
            .collect();
        let route = Route::new(&borrowed);
        fs::remove_file(route.path().join("dng/PPS_0008.dng")).unwrap();

        let err = Ingestor::from_config(route.ingest_config(), None)
            .unwrap()
            .ingest()
            .unwrap_err();
        assert!(matches!(
            err,
            IngestionError::Contract(ContractError::AssetCountMismatch {
                primary: 10,
                linked: 9
            })
        ));
        assert!(!route.output().exists());
    }

    /// A vanished source is reported per file; the rest of the tree is kept
    #[test]
    fn test_e2e_copy_failure_is_partial() {
        let route = five_captures();
        let set = Ingestor::from_config(route.ingest_config(), None)
            .unwrap()
            .ingest()
            .unwrap();
        fs::remove_file(route.path().join("dng/C.dng")).unwrap();

        let engine = Sequencer::new(SequencerConfig::default());
        let mut sink = FileSink::new("files", FileSinkConfig::new(route.output()));
        let outcome = engine
            .sequence(&set.records, set.open_index, set.end_index, &mut sink)
            .unwrap();

        let report = &outcome.sink_report;
        assert!(!report.is_complete());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].source, route.path().join("dng/C.dng"));
        assert_eq!(report.written.len(), 9);
        assert_eq!(route.output_names("jpgs").len(), 5);
        assert_eq!(route.output_names("dngs").len(), 4);
    }

    /// Configuration file drives ingestion, sequencing and the dispatcher
    #[test]
    fn test_e2e_from_config_file() {
        let route = five_captures();
        let config_path = route.path().join("route.toml");
        fs::write(
            &config_path,
            format!(
                r#"
[ingest]
jpg_dir = "{jpg}"
dng_dir = "{dng}"
open_marker = "OPEN"
end_marker = "END"

[ingest.timestamps]
kind = "manifest"
path = "times.toml"

[sequencer]
gap_multiplier = 2.0
strategy = "pairwise"

[output]
dir = "{out}"
log_summary = true
"#,
                jpg = route.path().join("jpg").display(),
                dng = route.path().join("dng").display(),
                out = route.output().display(),
            ),
        )
        .unwrap();

        let blueprint = ConfigLoader::load_from_path(&config_path).unwrap();
        let set = Ingestor::from_config(blueprint.ingest.clone(), config_path.parent())
            .unwrap()
            .ingest()
            .unwrap();

        let mut sink = Dispatcher::from_config(&blueprint.output).unwrap();
        assert_eq!(sink.sink_names(), vec!["files", "log"]);

        let outcome = Sequencer::new(blueprint.sequencer.clone())
            .sequence(&set.records, set.open_index, set.end_index, &mut sink)
            .unwrap();

        // gap of two mean intervals: 06:16 + 3300s
        assert_eq!(
            times(&outcome.plan.final_list),
            vec!["06:01:00", "06:16:00", "07:11:00", "07:51:00", "08:01:00"]
        );
        assert_eq!(outcome.sink_report.written.len(), 10);
        assert_eq!(route.output_names("jpgs")[2], "2_C_new-time=07-11-00.jpg");
    }

    /// An output tree wrapping the input directories is refused twice: by the
    /// config validator and again by the sink, leaving every source in place
    #[test]
    fn test_e2e_output_over_inputs_keeps_sources() {
        let route = five_captures();
        let mut blueprint = ConfigLoader::load_from_str(
            &format!(
                r#"
[ingest]
jpg_dir = "{jpg}"
dng_dir = "{dng}"

[output]
dir = "{sorted}"
"#,
                jpg = route.path().join("jpg").display(),
                dng = route.path().join("dng").display(),
                sorted = route.output().display(),
            ),
            ConfigFormat::Toml,
        )
        .unwrap();

        blueprint.output.dir = route.path().to_path_buf();
        let err = ConfigLoader::validate(&blueprint).unwrap_err();
        assert!(err.to_string().contains("output.dir"), "got: {err}");

        let set = Ingestor::from_config(route.ingest_config(), None)
            .unwrap()
            .ingest()
            .unwrap();
        let mut sink = FileSink::new("files", FileSinkConfig::new(route.path()));
        let err = Sequencer::new(SequencerConfig::default())
            .sequence(&set.records, set.open_index, set.end_index, &mut sink)
            .unwrap_err();

        assert!(matches!(err, ContractError::SinkReset { .. }), "got: {err}");
        assert!(route.path().join("jpg/B.jpg").exists());
        assert!(route.path().join("dng/E_end.dng").exists());
        assert!(route.path().join("times.toml").exists());
    }
}
