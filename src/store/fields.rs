// フィールドレジストリ - フィルタ述語とソートキーの対応表
// 認識できるフィールドは閉じた列挙型で表現し、名前の検証をここに集約する

use crate::core::error::{VacancyError, VacancyResult};
use crate::model::Vacancy;
use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 求人のフィールド識別子（列見出しと対応）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VacancyField {
    Number,
    Title,
    Description,
    Skills,
    Experience,
    Premium,
    Employer,
    Salary,
    Region,
    Currency,
    PublishedAt,
}

impl VacancyField {
    /// 表形式出力の列順
    pub const TABLE_COLUMNS: [VacancyField; 10] = [
        VacancyField::Number,
        VacancyField::Title,
        VacancyField::Description,
        VacancyField::Skills,
        VacancyField::Experience,
        VacancyField::Premium,
        VacancyField::Employer,
        VacancyField::Salary,
        VacancyField::Region,
        VacancyField::PublishedAt,
    ];

    const ALL: [VacancyField; 11] = [
        VacancyField::Number,
        VacancyField::Title,
        VacancyField::Description,
        VacancyField::Skills,
        VacancyField::Experience,
        VacancyField::Premium,
        VacancyField::Employer,
        VacancyField::Salary,
        VacancyField::Region,
        VacancyField::Currency,
        VacancyField::PublishedAt,
    ];

    pub const fn heading(&self) -> &'static str {
        match self {
            Self::Number => "№",
            Self::Title => "Название",
            Self::Description => "Описание",
            Self::Skills => "Навыки",
            Self::Experience => "Опыт работы",
            Self::Premium => "Премиум-вакансия",
            Self::Employer => "Компания",
            Self::Salary => "Оклад",
            Self::Region => "Название региона",
            Self::Currency => "Идентификатор валюты оклада",
            Self::PublishedAt => "Дата публикации вакансии",
        }
    }

    pub fn from_heading(name: &str) -> VacancyResult<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.heading() == name)
            .ok_or_else(|| VacancyError::invalid_field(name))
    }
}

impl fmt::Display for VacancyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

impl FromStr for VacancyField {
    type Err = VacancyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_heading(s)
    }
}

/// ソートキー
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Count(usize),
    Number(f64),
    Date(DateTime<FixedOffset>),
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Count(a), Self::Count(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            // 同じフィールドからは同じ種類のキーしか作られない
            _ => Ordering::Equal,
        }
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

pub type KeyExtractor = fn(&Vacancy) -> VacancyResult<SortKey>;
pub type Predicate = fn(&Vacancy, &str) -> VacancyResult<bool>;

/// フィールド識別子から型付き関数への対応表
pub struct FieldRegistry {
    sort_keys: HashMap<VacancyField, KeyExtractor>,
    predicates: HashMap<VacancyField, Predicate>,
}

static STANDARD_REGISTRY: Lazy<FieldRegistry> = Lazy::new(FieldRegistry::standard);

impl FieldRegistry {
    pub fn empty() -> Self {
        Self {
            sort_keys: HashMap::new(),
            predicates: HashMap::new(),
        }
    }

    /// 標準のソートキーと述語を登録したレジストリ
    pub fn standard() -> Self {
        let mut registry = Self::empty();

        registry.register_sort_key(VacancyField::Title, |v| Ok(SortKey::Text(v.title().to_string())));
        registry.register_sort_key(VacancyField::Description, |v| {
            Ok(SortKey::Text(v.details("description")?.description.clone()))
        });
        registry.register_sort_key(VacancyField::Employer, |v| {
            Ok(SortKey::Text(v.details("employer_name")?.employer.clone()))
        });
        registry.register_sort_key(VacancyField::Skills, |v| {
            Ok(SortKey::Count(v.details("key_skills")?.key_skills.len()))
        });
        registry.register_sort_key(VacancyField::Experience, |v| {
            Ok(SortKey::Count(v.experience_rank()? as usize))
        });
        registry.register_sort_key(VacancyField::Premium, |v| {
            Ok(SortKey::Text(v.details("premium")?.premium_label.clone()))
        });
        registry.register_sort_key(VacancyField::Region, |v| Ok(SortKey::Text(v.region().to_string())));
        registry.register_sort_key(VacancyField::Currency, |v| {
            Ok(SortKey::Text(v.salary().currency_name().to_string()))
        });
        registry.register_sort_key(VacancyField::PublishedAt, |v| Ok(SortKey::Date(v.published_at())));
        registry.register_sort_key(VacancyField::Salary, |v| {
            Ok(SortKey::Number(v.salary().mid_ruble_value()))
        });

        registry.register_predicate(VacancyField::Title, |v, value| Ok(v.title() == value));
        registry.register_predicate(VacancyField::Description, |v, value| {
            Ok(v.details("description")?.description == value)
        });
        registry.register_predicate(VacancyField::Employer, |v, value| {
            Ok(v.details("employer_name")?.employer == value)
        });
        registry.register_predicate(VacancyField::Skills, |v, value| {
            let skills = &v.details("key_skills")?.key_skills;
            Ok(value.split(", ").all(|wanted| skills.iter().any(|s| s == wanted)))
        });
        registry.register_predicate(VacancyField::Experience, |v, value| {
            Ok(v.details("experience_id")?.experience_label == value)
        });
        registry.register_predicate(VacancyField::Premium, |v, value| {
            Ok(v.details("premium")?.premium_label == value)
        });
        registry.register_predicate(VacancyField::Region, |v, value| Ok(v.region() == value));
        registry.register_predicate(VacancyField::Currency, |v, value| {
            Ok(v.salary().currency_name() == value)
        });
        registry.register_predicate(VacancyField::PublishedAt, |v, value| {
            Ok(v.published_date_label() == value)
        });
        registry.register_predicate(VacancyField::Salary, |v, value| {
            let amount = value
                .trim()
                .parse::<f64>()
                .map_err(|_| VacancyError::invalid_value(VacancyField::Salary.heading(), value))?;
            Ok(v.salary().contains(amount))
        });

        registry
    }

    /// プロセス共有の標準レジストリ
    pub fn global() -> &'static FieldRegistry {
        &STANDARD_REGISTRY
    }

    pub fn register_sort_key(&mut self, field: VacancyField, extractor: KeyExtractor) {
        self.sort_keys.insert(field, extractor);
    }

    pub fn register_predicate(&mut self, field: VacancyField, predicate: Predicate) {
        self.predicates.insert(field, predicate);
    }

    pub fn sort_key(&self, field: VacancyField) -> VacancyResult<KeyExtractor> {
        self.sort_keys
            .get(&field)
            .copied()
            .ok_or_else(|| VacancyError::invalid_field(field.heading()))
    }

    pub fn predicate(&self, field: VacancyField) -> VacancyResult<Predicate> {
        self.predicates
            .get(&field)
            .copied()
            .ok_or_else(|| VacancyError::invalid_field(field.heading()))
    }

    /// 名前からソート可能なフィールドを解決する
    pub fn sortable(&self, name: &str) -> VacancyResult<VacancyField> {
        let field = VacancyField::from_heading(name)?;
        self.sort_key(field).map(|_| field)
    }

    /// 名前からフィルタ可能なフィールドを解決する
    pub fn filterable(&self, name: &str) -> VacancyResult<VacancyField> {
        let field = VacancyField::from_heading(name)?;
        self.predicate(field).map(|_| field)
    }

    pub fn sortable_fields(&self) -> Vec<VacancyField> {
        VacancyField::ALL
            .into_iter()
            .filter(|f| self.sort_keys.contains_key(f))
            .collect()
    }

    pub fn filterable_fields(&self) -> Vec<VacancyField> {
        VacancyField::ALL
            .into_iter()
            .filter(|f| self.predicates.contains_key(f))
            .collect()
    }
}
