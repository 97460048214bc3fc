// 固定ルックアップテーブル
// 通貨・経験・真偽値のコード表は設定データとして注入される

use crate::core::error::{LookupKind, VacancyError, VacancyResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 給与の通貨コード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    Azn,
    Byr,
    Eur,
    Gel,
    Kgs,
    Kzt,
    Rur,
    Uah,
    Usd,
    Uzs,
}

impl Currency {
    pub const ALL: [Currency; 10] = [
        Currency::Azn,
        Currency::Byr,
        Currency::Eur,
        Currency::Gel,
        Currency::Kgs,
        Currency::Kzt,
        Currency::Rur,
        Currency::Uah,
        Currency::Usd,
        Currency::Uzs,
    ];

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Azn => "AZN",
            Self::Byr => "BYR",
            Self::Eur => "EUR",
            Self::Gel => "GEL",
            Self::Kgs => "KGS",
            Self::Kzt => "KZT",
            Self::Rur => "RUR",
            Self::Uah => "UAH",
            Self::Usd => "USD",
            Self::Uzs => "UZS",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

/// 必要な職務経験
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Experience {
    NoExperience,
    Between1And3,
    Between3And6,
    MoreThan6,
}

impl Experience {
    pub const ALL: [Experience; 4] = [
        Experience::NoExperience,
        Experience::Between1And3,
        Experience::Between3And6,
        Experience::MoreThan6,
    ];

    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoExperience => "noExperience",
            Self::Between1And3 => "between1And3",
            Self::Between3And6 => "between3And6",
            Self::MoreThan6 => "moreThan6",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.code() == code)
    }
}

/// 通貨テーブルの1エントリ
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyEntry {
    pub display_name: String,
    pub rate_to_rub: f64,
}

/// 不変のルックアップテーブル一式
#[derive(Debug, Clone)]
pub struct LookupTables {
    currencies: HashMap<Currency, CurrencyEntry>,
    experience: HashMap<Experience, String>,
    booleans: Vec<(String, bool)>,
    yes_label: String,
    no_label: String,
}

impl LookupTables {
    /// 固定の換算レートとラベルを持つ標準テーブル
    pub fn standard() -> Self {
        let currencies = [
            (Currency::Azn, "Манаты", 35.68),
            (Currency::Byr, "Белорусские рубли", 23.91),
            (Currency::Eur, "Евро", 59.90),
            (Currency::Gel, "Грузинский лари", 21.74),
            (Currency::Kgs, "Киргизский сом", 0.76),
            (Currency::Kzt, "Тенге", 0.13),
            (Currency::Rur, "Рубли", 1.0),
            (Currency::Uah, "Гривны", 1.64),
            (Currency::Usd, "Доллары", 60.66),
            (Currency::Uzs, "Узбекский сум", 0.0055),
        ]
        .into_iter()
        .map(|(currency, name, rate)| {
            (
                currency,
                CurrencyEntry {
                    display_name: name.to_string(),
                    rate_to_rub: rate,
                },
            )
        })
        .collect();

        let experience = [
            (Experience::NoExperience, "Нет опыта"),
            (Experience::Between1And3, "От 1 года до 3 лет"),
            (Experience::Between3And6, "От 3 до 6 лет"),
            (Experience::MoreThan6, "Более 6 лет"),
        ]
        .into_iter()
        .map(|(level, label)| (level, label.to_string()))
        .collect();

        // "Да"/"Нет" は表示ラベルそのものが入力に現れる版もあるため両方受け付ける
        let booleans = [("True", true), ("False", false), ("Да", true), ("Нет", false)]
            .into_iter()
            .map(|(code, value)| (code.to_string(), value))
            .collect();

        Self {
            currencies,
            experience,
            booleans,
            yes_label: "Да".to_string(),
            no_label: "Нет".to_string(),
        }
    }

    /// 通貨のレートだけを差し替えたテーブルを作成
    pub fn with_rate(mut self, currency: Currency, rate_to_rub: f64) -> Self {
        if let Some(entry) = self.currencies.get_mut(&currency) {
            entry.rate_to_rub = rate_to_rub;
        }
        self
    }

    pub fn currency(&self, code: &str) -> VacancyResult<Currency> {
        Currency::from_code(code)
            .filter(|c| self.currencies.contains_key(c))
            .ok_or_else(|| VacancyError::unknown_enum_value(LookupKind::Currency, code))
    }

    pub fn currency_entry(&self, currency: Currency) -> VacancyResult<&CurrencyEntry> {
        self.currencies
            .get(&currency)
            .ok_or_else(|| VacancyError::unknown_enum_value(LookupKind::Currency, currency.code()))
    }

    pub fn experience(&self, code: &str) -> VacancyResult<(Experience, &str)> {
        Experience::from_code(code)
            .and_then(|level| self.experience.get(&level).map(|label| (level, label.as_str())))
            .ok_or_else(|| VacancyError::unknown_enum_value(LookupKind::Experience, code))
    }

    pub fn boolean(&self, code: &str) -> VacancyResult<bool> {
        self.booleans
            .iter()
            .find(|(known, _)| known == code)
            .map(|(_, value)| *value)
            .ok_or_else(|| VacancyError::unknown_enum_value(LookupKind::Boolean, code))
    }

    pub fn boolean_label(&self, value: bool) -> &str {
        if value {
            &self.yes_label
        } else {
            &self.no_label
        }
    }
}

impl Default for LookupTables {
    fn default() -> Self {
        Self::standard()
    }
}
