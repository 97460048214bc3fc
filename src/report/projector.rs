// ReportProjector - 確定済み統計をレンダラー向けの表に変換する

use crate::aggregation::AggregateStats;
use crate::core::error::{VacancyError, VacancyResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

/// 年別表の1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearRow {
    pub year: i32,
    pub avg_salary_all: i64,
    pub count_all: u64,
    pub avg_salary_job: i64,
    pub count_job: u64,
}

/// レンダラーに渡す表形式の結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTables {
    pub job_name: String,
    pub year_headers: Vec<String>,
    pub year_rows: Vec<YearRow>,
    pub region_headers: Vec<String>,
    pub salary_by_region: Vec<(String, i64)>,
    /// パーセント表記（小数第3位で丸め）
    pub share_by_region: Vec<(String, f64)>,
}

impl ReportTables {
    pub fn to_json(&self) -> VacancyResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VacancyError::configuration(format!("JSON変換に失敗: {e}")))
    }
}

pub struct ReportProjector;

impl ReportProjector {
    pub fn project(stats: &AggregateStats) -> ReportTables {
        let job = &stats.job_name;

        let year_rows = stats
            .years
            .iter()
            .map(|summary| YearRow {
                year: summary.year,
                avg_salary_all: summary.all.average_salary,
                count_all: summary.all.count,
                avg_salary_job: summary.job.average_salary,
                count_job: summary.job.count,
            })
            .collect();

        let share_by_region = stats
            .share_by_region
            .iter()
            .map(|(region, share)| (region.clone(), to_percent(*share)))
            .collect();

        ReportTables {
            job_name: job.clone(),
            year_headers: vec![
                "Год".to_string(),
                "Средняя зарплата".to_string(),
                "Количество вакансий".to_string(),
                format!("Средняя зарплата - {job}"),
                format!("Количество вакансий - {job}"),
            ],
            year_rows,
            region_headers: vec![
                "Город".to_string(),
                "Уровень зарплат".to_string(),
                "Город".to_string(),
                "Доля вакансий".to_string(),
            ],
            salary_by_region: stats.salary_by_region.clone(),
            share_by_region,
        }
    }

    /// 6つの結果マップをコンソール表示用の行にする
    pub fn summary_lines(stats: &AggregateStats) -> Vec<String> {
        vec![
            format!(
                "Динамика уровня зарплат по годам: {}",
                year_map(&stats.salary_by_years())
            ),
            format!(
                "Динамика количества вакансий по годам: {}",
                year_map(&stats.count_by_years())
            ),
            format!(
                "Динамика уровня зарплат по годам для выбранной профессии: {}",
                year_map(&stats.salary_by_years_job())
            ),
            format!(
                "Динамика количества вакансий по годам для выбранной профессии: {}",
                year_map(&stats.count_by_years_job())
            ),
            format!(
                "Уровень зарплат по городам (в порядке убывания): {}",
                region_map(&stats.salary_by_region)
            ),
            format!(
                "Доля вакансий по городам (в порядке убывания): {}",
                region_map(&stats.share_by_region)
            ),
        ]
    }
}

fn to_percent(share: f64) -> f64 {
    (share * 100.0 * 1000.0).round() / 1000.0
}

fn year_map<V: Display>(map: &BTreeMap<i32, V>) -> String {
    let entries: Vec<String> = map.iter().map(|(year, value)| format!("{year}: {value}")).collect();
    format!("{{{}}}", entries.join(", "))
}

fn region_map<V: Display>(entries: &[(String, V)]) -> String {
    let entries: Vec<String> = entries
        .iter()
        .map(|(region, value)| format!("'{region}': {value}"))
        .collect();
    format!("{{{}}}", entries.join(", "))
}
