// 給与レンジとルーブル換算

use super::lookup::{Currency, LookupTables};
use crate::core::error::VacancyResult;
use serde::Serialize;
use std::fmt;

/// マイクロルーブル単位への換算係数
pub const MICROS_PER_RUBLE: i128 = 1_000_000;

/// 給与レンジ
///
/// `mid_ruble_value` は生成時に一度だけ固定レートで計算される。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryRange {
    from: f64,
    to: f64,
    currency: Currency,
    currency_name: String,
    gross_taxed: bool,
    mid_ruble_value: f64,
}

impl SalaryRange {
    pub fn new(from: f64, to: f64, currency: Currency, tables: &LookupTables) -> VacancyResult<Self> {
        let entry = tables.currency_entry(currency)?;

        Ok(Self {
            from,
            to,
            currency,
            currency_name: entry.display_name.clone(),
            gross_taxed: false,
            mid_ruble_value: (from + to) / 2.0 * entry.rate_to_rub,
        })
    }

    /// 税控除の有無を設定（レコード構築時のみ）
    pub(crate) fn with_gross_taxed(mut self, gross_taxed: bool) -> Self {
        self.gross_taxed = gross_taxed;
        self
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn currency_name(&self) -> &str {
        &self.currency_name
    }

    pub fn is_gross_taxed(&self) -> bool {
        self.gross_taxed
    }

    pub fn mid_ruble_value(&self) -> f64 {
        self.mid_ruble_value
    }

    /// 集計用の整数表現（マイクロルーブル）
    ///
    /// 整数で加算するため、合算の順序によって結果が変わらない。
    pub fn mid_ruble_micros(&self) -> i128 {
        (self.mid_ruble_value * MICROS_PER_RUBLE as f64).round() as i128
    }

    pub fn contains(&self, value: f64) -> bool {
        self.from <= value && value <= self.to
    }

    pub fn tax_label(&self) -> &'static str {
        if self.gross_taxed {
            "С вычетом налогов"
        } else {
            "Без вычета налогов"
        }
    }
}

impl fmt::Display for SalaryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}) ({})",
            group_thousands(self.from.trunc() as i64),
            group_thousands(self.to.trunc() as i64),
            self.currency_name,
            self.tax_label()
        )
    }
}

/// 3桁ごとに空白で区切る
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}
