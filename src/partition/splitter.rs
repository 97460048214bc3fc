// YearSplitter - 1つのCSVを公開年ごとのパーティションファイルに分割する

use crate::core::error::{EmptyInputKind, VacancyError, VacancyResult};
use crate::parser::strip_bom;
use crate::storage::StorageBackend;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// 分割結果の1ファイル分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPartition {
    pub year: String,
    pub id: String,
    pub rows: usize,
}

/// 年別パーティションのファイル名
pub fn partition_file_name(year: &str) -> String {
    format!("vacancies_by_{year}.csv")
}

pub struct YearSplitter<S: ?Sized> {
    storage: Arc<S>,
}

impl<S> YearSplitter<S>
where
    S: StorageBackend + ?Sized,
{
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// 出力ディレクトリ内の古いCSVパーティションを削除する
    pub async fn clear_partitions(&self, out_dir: &str) -> VacancyResult<usize> {
        let exists = self
            .storage
            .exists(out_dir)
            .await
            .map_err(|e| VacancyError::storage(out_dir, e))?;
        if !exists {
            return Ok(0);
        }

        let items = self
            .storage
            .list_items(out_dir)
            .await
            .map_err(|e| VacancyError::file_discovery(out_dir, e))?;

        let mut removed = 0;
        for item in items.iter().filter(|item| self.storage.is_partition_file(item)) {
            self.storage
                .delete_item(&item.id)
                .await
                .map_err(|e| VacancyError::storage(item.id.clone(), e))?;
            removed += 1;
        }

        info!(out_dir, removed, "old partitions removed");
        Ok(removed)
    }

    /// `source` を公開年ごとに分割して `out_dir` に書き出す
    ///
    /// 年は `published_at` の先頭4文字。出力順は年の初出順。
    pub async fn split(&self, source: &str, out_dir: &str) -> VacancyResult<Vec<SplitPartition>> {
        let bytes = self
            .storage
            .read_item(source)
            .await
            .map_err(|e| VacancyError::storage(source, e))?;
        let text = String::from_utf8(bytes)
            .map_err(|_| VacancyError::invalid_value("encoding", source))?;

        let groups = group_by_year(&text)?;

        let mut written = Vec::with_capacity(groups.len());
        for (year, data, rows) in groups {
            let id = Path::new(out_dir)
                .join(partition_file_name(&year))
                .to_string_lossy()
                .to_string();
            self.storage
                .write_item(&id, data)
                .await
                .map_err(|e| VacancyError::storage(id.clone(), e))?;
            written.push(SplitPartition { year, id, rows });
        }

        info!(source, partitions = written.len(), "source split by year");
        Ok(written)
    }
}

/// (年, CSVバイト列, 行数) を年の初出順で返す
fn group_by_year(text: &str) -> VacancyResult<Vec<(String, Vec<u8>, usize)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(strip_bom(text).as_bytes());
    let mut rows = reader.records();

    let header = match rows.next() {
        Some(row) => row?,
        None => return Err(VacancyError::empty_input(EmptyInputKind::NoRows)),
    };
    let date_column = header
        .iter()
        .position(|name| name == "published_at")
        .ok_or_else(|| VacancyError::missing_field("published_at"))?;

    let mut groups: Vec<(String, csv::Writer<Vec<u8>>, usize)> = Vec::new();
    for row in rows {
        let row = row?;
        let year: String = row.get(date_column).unwrap_or("").chars().take(4).collect();

        let position = match groups.iter().position(|(known, _, _)| *known == year) {
            Some(position) => position,
            None => {
                let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
                writer.write_record(&header)?;
                groups.push((year, writer, 0));
                groups.len() - 1
            }
        };

        let (_, writer, count) = &mut groups[position];
        writer.write_record(&row)?;
        *count += 1;
    }

    groups
        .into_iter()
        .map(|(year, writer, count)| {
            let data = writer
                .into_inner()
                .map_err(|e| VacancyError::io(year.clone(), e.into_error()))?;
            Ok((year, data, count))
        })
        .collect()
}
