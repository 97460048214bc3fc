// TableQuery - フィルタ・ソート・範囲・列指定による表出力

use super::row::format_row;
use crate::core::error::{VacancyError, VacancyResult};
use crate::store::{FieldRegistry, VacancyField, VacancyStore};

/// 検証済みの表クエリ
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableQuery {
    pub filter: Option<(VacancyField, String)>,
    /// (フィールド, 降順かどうか)
    pub sort: Option<(VacancyField, bool)>,
    /// 1始まりの開始位置と、終了位置（含まない）
    pub range: Option<(usize, Option<usize>)>,
    /// 空なら全列
    pub columns: Vec<VacancyField>,
}

/// 表クエリの実行結果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    /// 1件ずつ「見出し: 値」のブロックで表示する
    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            for (header, cell) in self.headers.iter().zip(row) {
                out.push_str(header);
                out.push_str(": ");
                out.push_str(&cell.replace('\n', ", "));
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}

impl TableQuery {
    /// 入力テキストを検証してクエリを組み立てる
    ///
    /// * `filter` - `"Поле: значение"`（空ならフィルタなし）
    /// * `sort` - 列見出し（空ならソートなし）
    /// * `reverse` - `Да` / `Нет` / 空
    /// * `range` - `"start [end]"`（1始まり、end は含まない）
    /// * `columns` - `", "` 区切りの列見出し
    pub fn parse(
        filter: &str,
        sort: &str,
        reverse: &str,
        range: &str,
        columns: &str,
    ) -> VacancyResult<Self> {
        let registry = FieldRegistry::global();

        let filter = if filter.is_empty() {
            None
        } else {
            if !filter.contains(':') {
                return Err(VacancyError::invalid_query(
                    "фильтр должен иметь вид \"Поле: значение\"",
                ));
            }
            let (name, value) = filter.split_once(": ").unwrap_or((filter, ""));
            Some((registry.filterable(name)?, value.to_string()))
        };

        let sort_field = if sort.is_empty() {
            None
        } else {
            Some(registry.sortable(sort)?)
        };

        let descending = match reverse {
            "Да" => true,
            "Нет" | "" => false,
            other => {
                return Err(VacancyError::invalid_query(format!(
                    "Порядок сортировки задан некорректно: {other}"
                )))
            }
        };

        Ok(Self {
            filter,
            sort: sort_field.map(|field| (field, descending)),
            range: parse_range(range)?,
            columns: parse_columns(columns)?,
        })
    }

    /// ストアに対してソート・フィルタを適用し、範囲と列で切り出す
    pub fn execute(&self, store: &mut VacancyStore) -> VacancyResult<TableView> {
        if let Some((field, descending)) = self.sort {
            store.sort(field, descending)?;
        }

        let numbered = match &self.filter {
            Some((field, value)) => store.filtered_rows(*field, value)?,
            None => store.all_rows(),
        };
        let total = numbered.len();

        let (start, end) = match self.range {
            Some((start, end)) => (start, end.unwrap_or(total + 1)),
            None => (1, total + 1),
        };
        // 直接組み立てられたクエリでは開始位置0もありうる
        let from = start.saturating_sub(1).min(total);
        let to = end.saturating_sub(1).clamp(from, total);

        let selected: Vec<usize> = VacancyField::TABLE_COLUMNS
            .iter()
            .enumerate()
            .filter(|(_, field)| self.columns.is_empty() || self.columns.contains(field))
            .map(|(position, _)| position)
            .collect();

        let rows = numbered[from..to]
            .iter()
            .map(|row| {
                let cells = format_row(row)?;
                Ok(selected.iter().map(|&i| cells[i].clone()).collect())
            })
            .collect::<VacancyResult<Vec<Vec<String>>>>()?;

        let headers = selected
            .iter()
            .map(|&i| VacancyField::TABLE_COLUMNS[i].heading().to_string())
            .collect();

        Ok(TableView { headers, rows })
    }
}

fn parse_range(text: &str) -> VacancyResult<Option<(usize, Option<usize>)>> {
    let numbers = text
        .split_whitespace()
        .map(|part| {
            part.parse::<usize>()
                .map_err(|_| VacancyError::invalid_query(format!("диапазон вывода: {part}")))
        })
        .collect::<VacancyResult<Vec<_>>>()?;

    match numbers.as_slice() {
        [] => Ok(None),
        [0, ..] => Err(VacancyError::invalid_query("диапазон вывода начинается с 1")),
        [start] => Ok(Some((*start, None))),
        [start, end] => Ok(Some((*start, Some(*end)))),
        _ => Err(VacancyError::invalid_query(format!("диапазон вывода: {text}"))),
    }
}

fn parse_columns(text: &str) -> VacancyResult<Vec<VacancyField>> {
    let mut columns = text
        .split(", ")
        .filter(|name| !name.is_empty())
        .map(|name| {
            let field = VacancyField::from_heading(name)?;
            if VacancyField::TABLE_COLUMNS.contains(&field) {
                Ok(field)
            } else {
                Err(VacancyError::invalid_field(name))
            }
        })
        .collect::<VacancyResult<Vec<_>>>()?;

    // 列指定があれば番号列は常に含める
    if !columns.is_empty() && !columns.contains(&VacancyField::Number) {
        columns.push(VacancyField::Number);
    }
    Ok(columns)
}
