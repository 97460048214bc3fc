// エンドツーエンドテスト: ファイル → 解析 → 集計 → 射影
#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::*;
use std::sync::Arc;
use tempfile::TempDir;
use vacancy_stats::aggregation::AggregationEngine;
use vacancy_stats::parser::RecordParser;
use vacancy_stats::processing::{NoOpProgressReporter, PartitionScheduler};
use vacancy_stats::query::TableQuery;
use vacancy_stats::report::ReportProjector;
use vacancy_stats::storage::local::LocalStorageBackend;
use vacancy_stats::App;

fn app() -> App<LocalStorageBackend> {
    App::new(Arc::new(LocalStorageBackend::new()))
}

#[tokio::test]
async fn test_sequential_stats_on_small_dataset() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(temp_dir.path(), "vacancies.csv", SMALL_CSV);

    let stats = app()
        .run(file.to_str().unwrap(), "Аналитик")
        .await
        .unwrap();

    assert_eq!(stats.total_vacancies, SMALL_VALID_ROWS as u64);

    let y2021 = stats.year(2021).unwrap();
    assert_eq!((y2021.all.count, y2021.all.average_salary), (4, 107747));
    assert_eq!((y2021.job.count, y2021.job.average_salary), (1, 90000));

    let y2022 = stats.year(2022).unwrap();
    assert_eq!((y2022.all.count, y2022.all.average_salary), (6, 123832));
    assert_eq!((y2022.job.count, y2022.job.average_salary), (2, 118528));

    assert_eq!(
        stats.salary_by_region,
        vec![
            ("Москва".to_string(), 165247),
            ("Санкт-Петербург".to_string(), 140000),
            ("Екатеринбург".to_string(), 95685),
            ("Казань".to_string(), 42970),
        ]
    );
    assert_eq!(
        stats.share_by_region,
        vec![
            ("Москва".to_string(), 0.4),
            ("Екатеринбург".to_string(), 0.3),
            ("Казань".to_string(), 0.2),
            ("Санкт-Петербург".to_string(), 0.1),
        ]
    );

    // 地域は初出順
    let order: Vec<_> = stats.regions.iter().map(|r| r.region.as_str()).collect();
    assert_eq!(order, vec!["Екатеринбург", "Москва", "Казань", "Санкт-Петербург"]);
}

#[tokio::test]
async fn test_dropped_row_is_counted() {
    let store = RecordParser::standard()
        .parse_partition("small", SMALL_CSV)
        .unwrap();

    assert_eq!(store.len(), SMALL_VALID_ROWS);
    assert_eq!(store.dropped_rows(), SMALL_DROPPED_ROWS);
}

#[tokio::test]
async fn test_summary_lines_for_small_dataset() {
    let store = RecordParser::standard()
        .parse_partition("small", SMALL_CSV)
        .unwrap();
    let stats = AggregationEngine::new("Аналитик").analyze(&store).unwrap();

    let lines = ReportProjector::summary_lines(&stats);
    assert_eq!(
        lines[0],
        "Динамика уровня зарплат по годам: {2021: 107747, 2022: 123832}"
    );
    assert_eq!(
        lines[1],
        "Динамика количества вакансий по годам: {2021: 4, 2022: 6}"
    );
    assert_eq!(
        lines[5],
        "Доля вакансий по городам (в порядке убывания): \
         {'Москва': 0.4, 'Екатеринбург': 0.3, 'Казань': 0.2, 'Санкт-Петербург': 0.1}"
    );

    let tables = ReportProjector::project(&stats);
    assert_eq!(tables.share_by_region[0], ("Москва".to_string(), 40.0));
}

#[tokio::test]
async fn test_split_then_aggregate_partitions() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_file(temp_dir.path(), "vacancies.csv", SMALL_CSV);
    let out_dir = temp_dir.path().join("parts");

    let app = app();
    let written = app
        .split(source.to_str().unwrap(), out_dir.to_str().unwrap())
        .await
        .unwrap();
    let years: Vec<_> = written.iter().map(|p| p.year.as_str()).collect();
    assert_eq!(years, vec!["2021", "2022"]);

    let (parallel, summary) = app
        .run_parallel(
            out_dir.to_str().unwrap(),
            "Аналитик",
            quiet_config(2),
            Arc::new(NoOpProgressReporter::new()),
        )
        .await
        .unwrap();
    let sequential = app.run(source.to_str().unwrap(), "Аналитик").await.unwrap();

    assert_eq!(summary.total_partitions, 2);
    assert_eq!(summary.total_vacancies, SMALL_VALID_ROWS as u64);
    assert_eq!(summary.dropped_rows, SMALL_DROPPED_ROWS);
    assert_eq!(parallel, sequential);
}

#[tokio::test]
async fn test_scheduler_on_directory_with_single_worker() {
    let temp_dir = TempDir::new().unwrap();
    write_partitions(temp_dir.path(), SMALL_CSV, &[vec![0, 1, 2], vec![3, 4, 5, 6], vec![7, 8, 9, 10]]);
    write_file(temp_dir.path(), "notes.txt", "not a partition");

    let scheduler = PartitionScheduler::new(
        Arc::new(LocalStorageBackend::new()),
        quiet_config(1),
        Arc::new(NoOpProgressReporter::new()),
    );
    let (stats, summary) = scheduler
        .aggregate_directory(temp_dir.path().to_str().unwrap(), AggregationEngine::new("Аналитик"))
        .await
        .unwrap();

    assert_eq!(summary.total_partitions, 3);
    assert_eq!(stats.total_vacancies, SMALL_VALID_ROWS as u64);
    assert_eq!(stats.year(2022).unwrap().all.average_salary, 123832);
}

#[tokio::test]
async fn test_table_query_on_small_dataset() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(temp_dir.path(), "vacancies.csv", SMALL_CSV);

    let query = TableQuery::parse("Название региона: Москва", "Оклад", "Да", "1 3", "Название, Оклад")
        .unwrap();
    let view = app().table(file.to_str().unwrap(), &query).await.unwrap();

    assert_eq!(view.headers, vec!["№", "Название", "Оклад"]);
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0][1], "Руководитель проекта");
    assert_eq!(view.rows[1][1], "Программист Python");
}
