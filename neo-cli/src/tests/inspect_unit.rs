//! Focused unit tests covering inspect configuration and output.

use super::helpers::{SampleDataset, write_utf8};
use super::*;
use crate::inspect::{
    InspectArgs, InspectConfig, Lookup, NO_MATCH_MESSAGE, config_from_layers_for_test,
    inspect_database,
};
use crate::sources::{DEFAULT_CADFILE, DEFAULT_NEOFILE, DataSources};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};

#[fixture]
fn dataset() -> SampleDataset {
    SampleDataset::new()
}

fn run_inspect(dataset: &SampleDataset, lookup: Lookup, verbose: bool) -> String {
    let config = InspectConfig {
        sources: DataSources {
            neofile: dataset.neofile(),
            cadfile: dataset.cadfile(),
        },
        lookup,
        verbose,
    };
    let db = config.sources.load().expect("sample dataset loads");
    let mut buffer = Vec::new();
    inspect_database(&db, &config, &mut buffer).expect("inspect succeeds");
    String::from_utf8(buffer).expect("utf-8 output")
}

#[rstest]
#[case::neither(None, None)]
#[case::both(Some("433"), Some("Eros"))]
fn lookup_requires_exactly_one_key(#[case] pdes: Option<&str>, #[case] name: Option<&str>) {
    let args = InspectArgs {
        pdes: pdes.map(str::to_owned),
        name: name.map(str::to_owned),
        ..InspectArgs::default()
    };
    let err = InspectConfig::try_from(args).expect_err("lookup should be rejected");
    match err {
        CliError::AmbiguousLookup { pdes_env, name_env } => {
            assert_eq!(pdes_env, ENV_INSPECT_PDES);
            assert_eq!(name_env, ENV_INSPECT_NAME);
        }
        other => panic!("expected AmbiguousLookup, found {other:?}"),
    }
}

#[rstest]
fn inspect_config_defaults_source_paths() {
    let args = InspectArgs {
        name: Some("Eros".to_owned()),
        ..InspectArgs::default()
    };
    let config = InspectConfig::try_from(args).expect("config should build");
    assert_eq!(config.lookup, Lookup::Name("Eros".to_owned()));
    assert_eq!(config.sources.neofile, Utf8PathBuf::from(DEFAULT_NEOFILE));
    assert_eq!(config.sources.cadfile, Utf8PathBuf::from(DEFAULT_CADFILE));
    assert!(!config.verbose);
}

#[rstest]
fn validate_reports_missing_neofile(dataset: SampleDataset) {
    let sources = DataSources {
        neofile: dataset.root().join("missing.csv"),
        cadfile: dataset.cadfile(),
    };
    let err = sources.validate().expect_err("missing file should fail");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_NEOFILE),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_rejects_directories(dataset: SampleDataset) {
    let sources = DataSources {
        neofile: dataset.neofile(),
        cadfile: dataset.root().to_path_buf(),
    };
    let err = sources.validate().expect_err("directory should fail");
    match err {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_CADFILE);
            assert_eq!(path, dataset.root());
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_surfaces_extraction_errors(dataset: SampleDataset) {
    write_utf8(&dataset.cadfile(), b"{ not valid json");
    let sources = DataSources {
        neofile: dataset.neofile(),
        cadfile: dataset.cadfile(),
    };
    let err = sources.load().expect_err("invalid JSON should fail");
    assert!(matches!(err, CliError::Extract(_)), "unexpected {err:?}");
}

#[rstest]
fn inspect_by_name_prints_summary(dataset: SampleDataset) {
    let output = run_inspect(&dataset, Lookup::Name("Eros".to_owned()), false);
    assert_eq!(
        output,
        "NEO 433 (Eros) has a diameter of 16.840 km and is not potentially hazardous.\n"
    );
}

#[rstest]
fn verbose_inspect_lists_approaches(dataset: SampleDataset) {
    let output = run_inspect(&dataset, Lookup::Designation("433".to_owned()), true);
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(
        lines,
        [
            "NEO 433 (Eros) has a diameter of 16.840 km and is not potentially hazardous.",
            "- On 1975-01-23 07:43, '433 (Eros)' approaches Earth at a distance of 0.15 au and a velocity of 5.40 km/s.",
            "- On 2056-01-24 04:29, '433 (Eros)' approaches Earth at a distance of 0.17 au and a velocity of 5.83 km/s.",
        ]
    );
}

#[rstest]
fn unknown_diameter_is_reported(dataset: SampleDataset) {
    let output = run_inspect(&dataset, Lookup::Designation("99942".to_owned()), false);
    assert_eq!(
        output,
        "NEO 99942 (Apophis) has an unknown diameter and is potentially hazardous.\n"
    );
}

#[rstest]
#[case::designation(Lookup::Designation("2015 XR".to_owned()))]
#[case::name(Lookup::Name("eros".to_owned()))]
fn missing_neo_prints_message(dataset: SampleDataset, #[case] lookup: Lookup) {
    let output = run_inspect(&dataset, lookup, true);
    assert_eq!(output, format!("{NO_MATCH_MESSAGE}\n"));
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "pdes": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence(dataset: SampleDataset) {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let cli_neofile = dataset.neofile();
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "neofile": dataset.root().join("from-file.csv").as_str(),
            "cadfile": dataset.cadfile().as_str(),
            "verbose": true,
        }),
        None,
    );
    composer.push_environment(json!({
        "neofile": dataset.root().join("from-env.csv").as_str(),
        "name": "Apophis",
    }));
    composer.push_cli(json!({ "neofile": cli_neofile.as_str() }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.sources.neofile, cli_neofile);
    assert_eq!(config.sources.cadfile, dataset.cadfile());
    assert_eq!(config.lookup, Lookup::Name("Apophis".to_owned()));
    assert!(config.verbose);
}
