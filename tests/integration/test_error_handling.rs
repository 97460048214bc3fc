// エラー処理テスト: 空入力・不正値・ワーカー失敗・設定エラー
#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::*;
use std::sync::Arc;
use tempfile::TempDir;
use vacancy_stats::core::error::{EmptyInputKind, ErrorSeverity, LookupKind, VacancyError};
use vacancy_stats::core::traits::MockProgressReporter;
use vacancy_stats::processing::{NoOpProgressReporter, StatsSettings};
use vacancy_stats::query::TableQuery;
use vacancy_stats::storage::local::LocalStorageBackend;
use vacancy_stats::App;

const HEADER: &str = "name,salary_from,salary_to,salary_currency,area_name,published_at\n";

fn app() -> App<LocalStorageBackend> {
    App::new(Arc::new(LocalStorageBackend::new()))
}

#[tokio::test]
async fn test_empty_file_is_terminal_notice() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(temp_dir.path(), "empty.csv", "");

    let error = app().run(file.to_str().unwrap(), "x").await.unwrap_err();

    assert!(matches!(
        error,
        VacancyError::EmptyInput {
            kind: EmptyInputKind::NoRows
        }
    ));
    assert!(error.is_terminal_notice());
    assert_eq!(error.to_string(), "Пустой файл");
}

#[tokio::test]
async fn test_header_only_file_is_terminal_notice() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(temp_dir.path(), "header.csv", HEADER);

    let error = app().run(file.to_str().unwrap(), "x").await.unwrap_err();

    assert!(matches!(
        error,
        VacancyError::EmptyInput {
            kind: EmptyInputKind::HeaderOnly
        }
    ));
    assert_eq!(error.to_string(), "Нет данных");
}

#[tokio::test]
async fn test_unknown_currency_is_hard_failure() {
    let temp_dir = TempDir::new().unwrap();
    let content = format!("{HEADER}Аналитик,100,200,XYZ,Москва,2022-01-01T00:00:00+0300\n");
    let file = write_file(temp_dir.path(), "bad.csv", &content);

    let error = app().run(file.to_str().unwrap(), "x").await.unwrap_err();

    assert!(matches!(
        error,
        VacancyError::UnknownEnumValue {
            kind: LookupKind::Currency,
            ..
        }
    ));
    assert!(!error.is_terminal_notice());
}

#[tokio::test]
async fn test_failed_partition_is_surfaced_by_name() {
    let temp_dir = TempDir::new().unwrap();
    write_partitions(temp_dir.path(), SMALL_CSV, &[vec![0, 1], vec![2, 3]]);
    write_file(
        temp_dir.path(),
        "part_002.csv",
        &format!("{HEADER}Аналитик,100,200,XYZ,Москва,2022-01-01T00:00:00+0300\n"),
    );

    let mut reporter = MockProgressReporter::new();
    reporter.expect_report_started().times(1).return_const(());
    reporter.expect_report_progress().return_const(());
    reporter
        .expect_report_error()
        .withf(|partition, _| partition == "part_002.csv")
        .times(1)
        .return_const(());
    reporter.expect_report_completed().never();

    let error = app()
        .run_parallel(
            temp_dir.path().to_str().unwrap(),
            "Аналитик",
            quiet_config(2).with_progress_reporting(true),
            Arc::new(reporter),
        )
        .await
        .unwrap_err();

    match error {
        VacancyError::PartitionWorkerFailure { partition, source } => {
            assert_eq!(partition, "part_002.csv");
            assert!(matches!(*source, VacancyError::UnknownEnumValue { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_partition_fails_the_run() {
    let temp_dir = TempDir::new().unwrap();
    write_partitions(temp_dir.path(), SMALL_CSV, &[vec![0, 1, 2]]);
    write_file(temp_dir.path(), "part_001.csv", HEADER);

    let error = app()
        .run_parallel(
            temp_dir.path().to_str().unwrap(),
            "Аналитик",
            quiet_config(2),
            Arc::new(NoOpProgressReporter::new()),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, VacancyError::PartitionWorkerFailure { .. }));
    assert_eq!(error.severity(), ErrorSeverity::High);
}

#[tokio::test]
async fn test_missing_directory_is_discovery_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nowhere");

    let error = app()
        .run_parallel(
            missing.to_str().unwrap(),
            "x",
            quiet_config(1),
            Arc::new(NoOpProgressReporter::new()),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, VacancyError::FileDiscovery { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_entry_is_discovery_error() {
    let temp_dir = TempDir::new().unwrap();
    write_partitions(temp_dir.path(), SMALL_CSV, &[vec![0, 1, 2]]);
    std::os::unix::fs::symlink(
        temp_dir.path().join("gone.csv"),
        temp_dir.path().join("part_001.csv"),
    )
    .unwrap();

    let error = app()
        .run_parallel(
            temp_dir.path().to_str().unwrap(),
            "x",
            quiet_config(2),
            Arc::new(NoOpProgressReporter::new()),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, VacancyError::FileDiscovery { .. }));
}

#[tokio::test]
async fn test_zero_workers_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    write_partitions(temp_dir.path(), SMALL_CSV, &[vec![0]]);

    let error = app()
        .run_parallel(
            temp_dir.path().to_str().unwrap(),
            "x",
            quiet_config(0),
            Arc::new(NoOpProgressReporter::new()),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, VacancyError::Configuration { .. }));
}

#[tokio::test]
async fn test_table_without_matches_is_terminal_notice() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(temp_dir.path(), "vacancies.csv", SMALL_CSV);

    let query = TableQuery::parse("Компания: Google", "", "", "", "").unwrap();
    let error = app().table(file.to_str().unwrap(), &query).await.unwrap_err();

    assert!(error.is_terminal_notice());
    assert_eq!(error.to_string(), "Ничего не найдено");
}

#[test]
fn test_invalid_table_query_is_rejected_before_reading() {
    let error = TableQuery::parse("", "Зарплата", "", "", "").unwrap_err();
    assert!(matches!(error, VacancyError::InvalidField { .. }));
    assert!(!error.is_terminal_notice());
}

#[test]
fn test_settings_with_unknown_key_is_configuration_error() {
    let error = StatsSettings::from_json(r#"{"job_name": "Аналитик", "colour": "red"}"#)
        .unwrap_err();
    assert!(matches!(error, VacancyError::Configuration { .. }));

    let settings = StatsSettings::from_json(r#"{"workers": 3}"#).unwrap();
    assert_eq!(settings.workers, Some(3));
}
