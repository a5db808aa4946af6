use std::path::Path;

use chrono::NaiveDate;
use sales_etl_lib::{run_pipeline, EtlError, PipelineConfig, SalesStore};
use tempfile::tempdir;
use test_utils::{create_sales_csv, write_sales_files};

extern crate test_utils;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Pipeline config pointing at a scratch data dir and a scratch database.
/// Charts are a terminal side effect and stay off in tests.
fn config_for(data_dir: &Path, work_dir: &Path) -> PipelineConfig {
    PipelineConfig {
        data_dir: data_dir.to_string_lossy().into_owned(),
        connection_string: work_dir.join("sales.db").to_string_lossy().into_owned(),
        chart_dir: work_dir.to_string_lossy().into_owned(),
        render_charts: false,
        ..PipelineConfig::default()
    }
}

#[test]
fn two_rows_on_one_day_roll_up_into_one_bucket() {
    let data = tempdir().unwrap();
    let work = tempdir().unwrap();
    write_sales_files(
        data.path(),
        &[(
            "sales.csv",
            create_sales_csv(vec![
                ["2024-01-05", "A", "3", "10.0"],
                ["2024-01-05", "B", "2", "5.0"],
            ]),
        )],
    );
    let config = config_for(data.path(), work.path());

    let summary = run_pipeline(&config).unwrap();
    assert_eq!(summary.rows_loaded, 2);

    let store = SalesStore::open(&config.connection_string).unwrap();
    assert_eq!(
        store.read_daily(&config).unwrap(),
        vec![(date(2024, 1, 5), 40.0)]
    );
    assert_eq!(
        store.read_monthly(&config).unwrap(),
        vec![(date(2024, 1, 1), 40.0)]
    );
}

#[test]
fn adjacent_days_across_a_month_boundary_stay_separate() {
    let data = tempdir().unwrap();
    let work = tempdir().unwrap();
    write_sales_files(
        data.path(),
        &[(
            "sales.csv",
            create_sales_csv(vec![
                ["2024-01-31", "A", "1", "10.0"],
                ["2024-02-01", "A", "1", "20.0"],
            ]),
        )],
    );
    let config = config_for(data.path(), work.path());

    run_pipeline(&config).unwrap();

    let store = SalesStore::open(&config.connection_string).unwrap();
    assert_eq!(
        store.read_daily(&config).unwrap(),
        vec![(date(2024, 1, 31), 10.0), (date(2024, 2, 1), 20.0)]
    );
    assert_eq!(
        store.read_monthly(&config).unwrap(),
        vec![(date(2024, 1, 1), 10.0), (date(2024, 2, 1), 20.0)]
    );
}

#[test]
fn rows_with_empty_numerics_still_occupy_their_day() {
    let data = tempdir().unwrap();
    let work = tempdir().unwrap();
    write_sales_files(
        data.path(),
        &[(
            "sales.csv",
            create_sales_csv(vec![["2024-01-05", "A", "", ""]]),
        )],
    );
    let config = config_for(data.path(), work.path());

    let summary = run_pipeline(&config).unwrap();
    assert_eq!(summary.rows_loaded, 1);

    let store = SalesStore::open(&config.connection_string).unwrap();
    assert_eq!(
        store.read_daily(&config).unwrap(),
        vec![(date(2024, 1, 5), 0.0)]
    );
}

#[test]
fn empty_input_exits_cleanly_without_touching_the_store() {
    let data = tempdir().unwrap();
    let work = tempdir().unwrap();
    let config = config_for(data.path(), work.path());

    let summary = run_pipeline(&config).unwrap();
    assert_eq!(summary.files_read, 0);
    assert_eq!(summary.rows_loaded, 0);
    assert!(!work.path().join("sales.db").exists());
}

#[test]
fn header_only_input_never_creates_the_store() {
    let data = tempdir().unwrap();
    let work = tempdir().unwrap();
    std::fs::write(
        data.path().join("sales.csv"),
        "date,product_id,quantity,price\n",
    )
    .unwrap();
    let config = config_for(data.path(), work.path());

    let summary = run_pipeline(&config).unwrap();
    assert_eq!(summary.files_read, 1);
    assert_eq!(summary.rows_loaded, 0);
    assert!(!work.path().join("sales.db").exists());
}

#[test]
fn zero_row_run_leaves_prior_aggregates_intact() {
    let data = tempdir().unwrap();
    let work = tempdir().unwrap();
    write_sales_files(
        data.path(),
        &[(
            "sales.csv",
            create_sales_csv(vec![["2024-01-05", "A", "3", "10.0"]]),
        )],
    );
    let config = config_for(data.path(), work.path());
    run_pipeline(&config).unwrap();

    // the file still matches the pattern but now carries a header and no rows
    std::fs::write(
        data.path().join("sales.csv"),
        "date,product_id,quantity,price\n",
    )
    .unwrap();
    run_pipeline(&config).unwrap();

    let store = SalesStore::open(&config.connection_string).unwrap();
    assert_eq!(
        store.read_daily(&config).unwrap(),
        vec![(date(2024, 1, 5), 30.0)]
    );
    assert_eq!(
        store.read_monthly(&config).unwrap(),
        vec![(date(2024, 1, 1), 30.0)]
    );
    assert_eq!(store.raw_row_count(&config).unwrap(), 1);
}

#[test]
fn rerunning_replaces_aggregates_and_appends_raw_facts() {
    let data = tempdir().unwrap();
    let work = tempdir().unwrap();
    write_sales_files(
        data.path(),
        &[(
            "sales.csv",
            create_sales_csv(vec![
                ["2024-01-05", "A", "3", "10.0"],
                ["2024-01-06", "B", "2", "5.0"],
            ]),
        )],
    );
    let config = config_for(data.path(), work.path());

    run_pipeline(&config).unwrap();
    let store = SalesStore::open(&config.connection_string).unwrap();
    let first_daily = store.read_daily(&config).unwrap();
    let first_monthly = store.read_monthly(&config).unwrap();
    let first_raw = store.raw_row_count(&config).unwrap();
    drop(store);

    run_pipeline(&config).unwrap();
    let store = SalesStore::open(&config.connection_string).unwrap();
    assert_eq!(store.read_daily(&config).unwrap(), first_daily);
    assert_eq!(store.read_monthly(&config).unwrap(), first_monthly);
    assert_eq!(store.raw_row_count(&config).unwrap(), first_raw * 2);
}

#[test]
fn revenue_is_conserved_across_rollup_granularities() {
    let data = tempdir().unwrap();
    let work = tempdir().unwrap();
    write_sales_files(
        data.path(),
        &[
            (
                "january.csv",
                create_sales_csv(vec![
                    ["2024-01-05", "A", "3", "10.0"],
                    ["2024-01-31", "B", "2", "5.25"],
                ]),
            ),
            (
                "february.csv",
                create_sales_csv(vec![
                    ["2024-02-01", "A", "7", "0.5"],
                    ["2024-02-14", "C", "1", "19.75"],
                ]),
            ),
        ],
    );
    let config = config_for(data.path(), work.path());

    run_pipeline(&config).unwrap();

    let store = SalesStore::open(&config.connection_string).unwrap();
    let daily_total: f64 = store
        .read_daily(&config)
        .unwrap()
        .iter()
        .map(|(_, v)| v)
        .sum();
    let monthly_total: f64 = store
        .read_monthly(&config)
        .unwrap()
        .iter()
        .map(|(_, v)| v)
        .sum();

    assert_eq!(daily_total, 30.0 + 10.5 + 3.5 + 19.75);
    assert_eq!(monthly_total, daily_total);
}

#[test]
fn unparsable_date_aborts_the_run() {
    let data = tempdir().unwrap();
    let work = tempdir().unwrap();
    write_sales_files(
        data.path(),
        &[(
            "sales.csv",
            create_sales_csv(vec![
                ["2024-01-05", "A", "3", "10.0"],
                ["Jan 6th", "B", "2", "5.0"],
            ]),
        )],
    );
    let config = config_for(data.path(), work.path());

    let err = run_pipeline(&config).unwrap_err();
    assert!(matches!(err, EtlError::Date { .. }));
    // nothing was committed for the failed batch
    assert!(!work.path().join("sales.db").exists());
}

#[test]
fn mixed_case_whitespace_headers_are_normalized() {
    let work = tempdir().unwrap();
    let config = PipelineConfig {
        data_dir: String::from("tests/resources"),
        file_pattern: String::from("mixed_case_headers.csv"),
        connection_string: work.path().join("sales.db").to_string_lossy().into_owned(),
        chart_dir: work.path().to_string_lossy().into_owned(),
        render_charts: false,
        ..PipelineConfig::default()
    };

    let summary = run_pipeline(&config).unwrap();
    assert_eq!(summary.rows_loaded, 2);

    let store = SalesStore::open(&config.connection_string).unwrap();
    assert_eq!(
        store.read_daily(&config).unwrap(),
        vec![(date(2024, 1, 5), 40.0)]
    );
}
