//! Focused unit tests covering query configuration and output.

use super::helpers::SampleDataset;
use super::*;
use crate::query::{
    DEFAULT_STDOUT_LIMIT, QueryArgs, QueryConfig, config_from_layers_for_test, query_database,
};
use crate::sources::DataSources;
use chrono::NaiveDate;
use neo_core::QueryCriteria;
use neo_data::WriteError;
use rstest::{fixture, rstest};

#[fixture]
fn dataset() -> SampleDataset {
    SampleDataset::new()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn config_for(dataset: &SampleDataset, criteria: QueryCriteria) -> QueryConfig {
    QueryConfig {
        sources: DataSources {
            neofile: dataset.neofile(),
            cadfile: dataset.cadfile(),
        },
        criteria,
        limit: None,
        outfile: None,
    }
}

fn run_query(config: &QueryConfig) -> Result<String, CliError> {
    let db = config.sources.load()?;
    let mut buffer = Vec::new();
    query_database(&db, config, &mut buffer)?;
    Ok(String::from_utf8(buffer).expect("utf-8 output"))
}

#[rstest]
fn start_after_end_is_rejected() {
    let args = QueryArgs {
        start_date: Some(date(2030, 1, 1)),
        end_date: Some(date(2020, 1, 1)),
        ..QueryArgs::default()
    };
    let err = QueryConfig::try_from(args).expect_err("empty window should fail");
    match err {
        CliError::InvalidDateRange { start, end } => {
            assert_eq!(start, date(2030, 1, 1));
            assert_eq!(end, date(2020, 1, 1));
        }
        other => panic!("expected InvalidDateRange, found {other:?}"),
    }
}

#[rstest]
fn flags_map_onto_criteria() {
    let args = QueryArgs {
        date: Some(date(2029, 4, 13)),
        start_date: Some(date(2029, 4, 13)),
        end_date: Some(date(2029, 4, 13)),
        min_distance: Some(0.0),
        max_distance: Some(0.1),
        min_velocity: Some(1.0),
        max_velocity: Some(20.0),
        min_diameter: Some(0.1),
        max_diameter: Some(10.0),
        hazardous: Some(true),
        limit: Some(3),
        ..QueryArgs::default()
    };
    let config = QueryConfig::try_from(args).expect("config should build");
    assert_eq!(
        config.criteria,
        QueryCriteria {
            date: Some(date(2029, 4, 13)),
            start_date: Some(date(2029, 4, 13)),
            end_date: Some(date(2029, 4, 13)),
            distance_min: Some(0.0),
            distance_max: Some(0.1),
            velocity_min: Some(1.0),
            velocity_max: Some(20.0),
            diameter_min: Some(0.1),
            diameter_max: Some(10.0),
            hazardous: Some(true),
        }
    );
    assert_eq!(config.criteria.into_filters().len(), 10);
    assert_eq!(config.limit, Some(3));
}

#[rstest]
#[case::unset(None, DEFAULT_STDOUT_LIMIT)]
#[case::zero(Some(0), DEFAULT_STDOUT_LIMIT)]
#[case::explicit(Some(2), 2)]
fn stdout_limit_falls_back_to_default(
    dataset: SampleDataset,
    #[case] limit: Option<usize>,
    #[case] expected: usize,
) {
    let config = QueryConfig {
        limit,
        ..config_for(&dataset, QueryCriteria::default())
    };
    assert_eq!(config.stdout_limit(), expected);
}

#[rstest]
fn close_approaches_print_in_file_order(dataset: SampleDataset) {
    let criteria = QueryCriteria {
        distance_max: Some(0.1),
        ..QueryCriteria::default()
    };
    let output = run_query(&config_for(&dataset, criteria)).expect("query succeeds");
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(
        lines,
        [
            "On 2029-04-13 21:46, '99942 (Apophis)' approaches Earth at a distance of 0.00 au and a velocity of 7.42 km/s.",
            "On 2015-12-22 10:49, '2015 XR' approaches Earth at a distance of 0.03 au and a velocity of 6.16 km/s.",
        ]
    );
}

#[rstest]
fn limit_caps_printed_results(dataset: SampleDataset) {
    let config = QueryConfig {
        limit: Some(1),
        ..config_for(&dataset, QueryCriteria::default())
    };
    let output = run_query(&config).expect("query succeeds");
    assert_eq!(output.lines().count(), 1);
    assert!(output.starts_with("On 1975-01-23 07:43, '433 (Eros)'"));
}

#[rstest]
#[case::non_hazardous(Some(false), None, 2)]
#[case::hazardous(Some(true), None, 1)]
#[case::known_diameter(None, Some(0.0), 2)]
fn neo_criteria_skip_unlinked_approaches(
    dataset: SampleDataset,
    #[case] hazardous: Option<bool>,
    #[case] diameter_min: Option<f64>,
    #[case] expected: usize,
) {
    let criteria = QueryCriteria {
        hazardous,
        diameter_min,
        ..QueryCriteria::default()
    };
    let output = run_query(&config_for(&dataset, criteria)).expect("query succeeds");
    assert_eq!(output.lines().count(), expected);
    assert!(!output.contains("2015 XR"), "unlinked approach matched: {output}");
}

#[rstest]
fn outfile_receives_all_matches(dataset: SampleDataset) {
    let outfile = dataset.root().join("out/results.csv");
    let config = QueryConfig {
        outfile: Some(outfile.clone()),
        ..config_for(&dataset, QueryCriteria::default())
    };
    let output = run_query(&config).expect("query succeeds");
    assert_eq!(output, format!("Wrote 4 close approaches to {outfile}\n"));

    let written = std::fs::read_to_string(&outfile).expect("read export");
    assert_eq!(written.lines().count(), 5);
    assert!(written.contains(",2015 XR,,,"), "unexpected export {written}");
}

#[rstest]
fn outfile_with_unknown_extension_fails(dataset: SampleDataset) {
    let config = QueryConfig {
        outfile: Some(dataset.root().join("results.txt")),
        ..config_for(&dataset, QueryCriteria::default())
    };
    let err = run_query(&config).expect_err("unknown extension should fail");
    match err {
        CliError::Export(WriteError::UnsupportedFormat { .. }) => {}
        other => panic!("expected UnsupportedFormat, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence(dataset: SampleDataset) {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "neofile": dataset.neofile().as_str(),
            "limit": 5,
            "max_distance": 0.5,
        }),
        None,
    );
    composer.push_environment(json!({ "hazardous": true, "limit": 4 }));
    composer.push_cli(json!({ "limit": 2 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.sources.neofile, dataset.neofile());
    assert_eq!(config.limit, Some(2));
    assert_eq!(config.criteria.hazardous, Some(true));
    assert_eq!(config.criteria.distance_max, Some(0.5));
}

#[rstest]
fn merged_date_window_is_validated() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "start_date": "2030-01-01" }), None);
    composer.push_cli(json!({ "end_date": "2020-01-01" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("empty window should fail after merging");
    assert!(
        matches!(err, CliError::InvalidDateRange { .. }),
        "unexpected {err:?}"
    );
}
