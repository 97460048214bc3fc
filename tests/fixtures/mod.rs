// 統合テスト用のデータとヘルパー
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use vacancy_stats::processing::DefaultSchedulerConfig;

/// 有効な10行と、セルが欠けた1行を含む小さなデータセット
pub const SMALL_CSV: &str = include_str!("vacancies_small.csv");

pub const SMALL_VALID_ROWS: usize = 10;
pub const SMALL_DROPPED_ROWS: usize = 1;

/// テスト用の静かなスケジューラ設定
pub fn quiet_config(workers: usize) -> DefaultSchedulerConfig {
    DefaultSchedulerConfig::default()
        .with_max_workers(workers)
        .with_buffer_size(4)
        .with_progress_reporting(false)
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// CSVテキストをヘッダーとデータ行に分ける（引用符内の改行を保つ）
pub fn csv_rows(text: &str) -> (csv::StringRecord, Vec<csv::StringRecord>) {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let header = reader.headers().unwrap().clone();
    let rows = reader.records().map(|row| row.unwrap()).collect();
    (header, rows)
}

pub fn csv_text(header: &csv::StringRecord, rows: &[csv::StringRecord]) -> String {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    writer.write_record(header).unwrap();
    for row in rows {
        writer.write_record(row).unwrap();
    }
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

/// 行のグループごとにパーティションファイルを書き出す（ファイル名順がグループ順）
pub fn write_partitions(dir: &Path, text: &str, groups: &[Vec<usize>]) -> Vec<PathBuf> {
    let (header, rows) = csv_rows(text);
    groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let selected: Vec<_> = group.iter().map(|&r| rows[r].clone()).collect();
            write_file(dir, &format!("part_{i:03}.csv"), &csv_text(&header, &selected))
        })
        .collect()
}
