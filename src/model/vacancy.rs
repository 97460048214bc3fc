// 正規化済みの求人レコード

use super::lookup::Experience;
use super::salary::SalaryRange;
use crate::core::error::{VacancyError, VacancyResult};
use chrono::{DateTime, Datelike, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static FIRST_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d*\.\d+|\d+").expect("valid number pattern"));

/// 拡張属性（7列以上の行にのみ存在）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VacancyDetails {
    pub description: String,
    pub key_skills: Vec<String>,
    pub experience: Experience,
    pub experience_label: String,
    pub premium: bool,
    pub premium_label: String,
    pub employer: String,
}

/// 求人レコード
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vacancy {
    title: String,
    salary: SalaryRange,
    region: String,
    published_at: DateTime<FixedOffset>,
    published_year: i32,
    details: Option<VacancyDetails>,
}

impl Vacancy {
    pub fn new(
        title: impl Into<String>,
        salary: SalaryRange,
        region: impl Into<String>,
        published_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            title: title.into(),
            salary,
            region: region.into(),
            published_year: published_at.year(),
            published_at,
            details: None,
        }
    }

    pub fn with_details(mut self, details: VacancyDetails) -> Self {
        self.details = Some(details);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn salary(&self) -> &SalaryRange {
        &self.salary
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn published_at(&self) -> DateTime<FixedOffset> {
        self.published_at
    }

    pub fn published_year(&self) -> i32 {
        self.published_year
    }

    /// 公開日を `dd.mm.yyyy` 形式で返す
    pub fn published_date_label(&self) -> String {
        self.published_at.format("%d.%m.%Y").to_string()
    }

    pub fn has_details(&self) -> bool {
        self.details.is_some()
    }

    /// 拡張属性を取得する。存在しなければ `field` 名で MissingField を返す
    pub fn details(&self, field: &str) -> VacancyResult<&VacancyDetails> {
        self.details
            .as_ref()
            .ok_or_else(|| VacancyError::missing_field(field))
    }

    /// 経験ラベルに含まれる最初の数値（数字がなければ0）
    pub fn experience_rank(&self) -> VacancyResult<u32> {
        let details = self.details("experience_id")?;
        Ok(first_number(&details.experience_label))
    }
}

pub(crate) fn first_number(label: &str) -> u32 {
    FIRST_NUMBER
        .find(label)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(|n| n as u32)
        .unwrap_or(0)
}
