// 表の行への射影

use crate::core::error::VacancyResult;
use crate::store::{NumberedVacancy, VacancyField};

/// 長いテキストセルの最大文字数
pub const MAX_CELL_CHARS: usize = 100;

/// 100文字を超えるテキストを切り詰めて `...` を付ける
pub fn truncate_cell(text: &str) -> String {
    if text.chars().count() > MAX_CELL_CHARS {
        let head: String = text.chars().take(MAX_CELL_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// 番号付き求人を列順（`VacancyField::TABLE_COLUMNS`）のセル列にする
pub fn format_row(row: &NumberedVacancy<'_>) -> VacancyResult<Vec<String>> {
    VacancyField::TABLE_COLUMNS
        .iter()
        .map(|field| format_cell(row, *field))
        .collect()
}

fn format_cell(row: &NumberedVacancy<'_>, field: VacancyField) -> VacancyResult<String> {
    let vacancy = row.vacancy;

    Ok(match field {
        VacancyField::Number => (row.index + 1).to_string(),
        VacancyField::Title => vacancy.title().to_string(),
        VacancyField::Description => truncate_cell(&vacancy.details("description")?.description),
        VacancyField::Skills => truncate_cell(&vacancy.details("key_skills")?.key_skills.join("\n")),
        VacancyField::Experience => vacancy.details("experience_id")?.experience_label.clone(),
        VacancyField::Premium => vacancy.details("premium")?.premium_label.clone(),
        VacancyField::Employer => vacancy.details("employer_name")?.employer.clone(),
        VacancyField::Salary => vacancy.salary().to_string(),
        VacancyField::Region => vacancy.region().to_string(),
        VacancyField::Currency => vacancy.salary().currency_name().to_string(),
        VacancyField::PublishedAt => vacancy.published_date_label(),
    })
}
