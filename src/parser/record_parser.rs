// RecordParser - 区切りテキストから検証済みの求人レコードを作る

use super::normalize::{normalize_cell, strip_bom, LINE_SENTINEL};
use crate::core::error::{EmptyInputKind, VacancyError, VacancyResult};
use crate::model::{LookupTables, SalaryRange, Vacancy, VacancyDetails};
use crate::store::VacancyStore;
use chrono::DateTime;
use std::sync::Arc;
use tracing::debug;

/// 公開日時のフォーマット（例: 2022-07-05T18:19:30+0300）
pub const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// 基本列の数。これを超える行は拡張属性を持つ
pub const BASE_FIELD_COUNT: usize = 6;

/// ヘッダー名とセル値の対応（ヘッダー順を保持）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn require(&self, name: &str) -> VacancyResult<&str> {
        self.get(name).ok_or_else(|| VacancyError::missing_field(name))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// 解析済みテーブル
#[derive(Debug, Clone)]
pub struct ParsedTable {
    pub header: Vec<String>,
    pub records: Vec<RawRecord>,
    /// セル数がヘッダーと一致せず捨てた行の数
    pub dropped_rows: usize,
}

/// 行の解析器。ルックアップテーブルは生成時に注入する
#[derive(Debug, Clone)]
pub struct RecordParser {
    tables: Arc<LookupTables>,
}

impl RecordParser {
    pub fn new(tables: Arc<LookupTables>) -> Self {
        Self { tables }
    }

    pub fn standard() -> Self {
        Self::new(Arc::new(LookupTables::standard()))
    }

    pub fn tables(&self) -> &LookupTables {
        &self.tables
    }

    /// CSVテキストをヘッダーと行に分解する
    ///
    /// 空でないセルの数がヘッダー数と一致しない行は黙って捨てる。
    pub fn parse_text(&self, text: &str) -> VacancyResult<ParsedTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(strip_bom(text).as_bytes());
        let mut rows = reader.records();

        let header: Vec<String> = match rows.next() {
            Some(row) => row?.iter().map(str::to_string).collect(),
            None => return Err(VacancyError::empty_input(EmptyInputKind::NoRows)),
        };

        let mut records = Vec::new();
        let mut data_rows = 0usize;
        let mut dropped_rows = 0usize;

        for row in rows {
            let row = row?;
            data_rows += 1;

            let cells: Vec<&str> = row.iter().filter(|cell| !cell.is_empty()).collect();
            if cells.len() != header.len() {
                dropped_rows += 1;
                continue;
            }

            records.push(RawRecord {
                fields: header
                    .iter()
                    .cloned()
                    .zip(cells.into_iter().map(normalize_cell))
                    .collect(),
            });
        }

        if data_rows == 0 {
            return Err(VacancyError::empty_input(EmptyInputKind::HeaderOnly));
        }

        debug!(
            kept = records.len(),
            dropped = dropped_rows,
            "parsed delimited rows"
        );

        Ok(ParsedTable {
            header,
            records,
            dropped_rows,
        })
    }

    /// 1行分のレコードから求人を構築する
    pub fn build_vacancy(&self, record: &RawRecord) -> VacancyResult<Vacancy> {
        let tables = self.tables.as_ref();

        let from = parse_amount(record, "salary_from")?;
        let to = parse_amount(record, "salary_to")?;
        let currency = tables.currency(record.require("salary_currency")?)?;
        let mut salary = SalaryRange::new(from, to, currency, tables)?;

        let published_raw = record.require("published_at")?;
        let published_at = DateTime::parse_from_str(published_raw, PUBLISHED_AT_FORMAT)
            .map_err(|_| VacancyError::invalid_value("published_at", published_raw))?;

        let mut details = None;
        if record.len() > BASE_FIELD_COUNT {
            let (experience, experience_label) =
                tables.experience(record.require("experience_id")?)?;
            let premium = tables.boolean(record.require("premium")?)?;
            salary = salary.with_gross_taxed(tables.boolean(record.require("salary_gross")?)?);

            details = Some(VacancyDetails {
                description: record.require("description")?.to_string(),
                key_skills: record
                    .require("key_skills")?
                    .split(LINE_SENTINEL)
                    .map(str::to_string)
                    .collect(),
                experience,
                experience_label: experience_label.to_string(),
                premium,
                premium_label: tables.boolean_label(premium).to_string(),
                employer: record.require("employer_name")?.to_string(),
            });
        }

        let vacancy = Vacancy::new(
            record.require("name")?,
            salary,
            record.require("area_name")?,
            published_at,
        );

        Ok(match details {
            Some(details) => vacancy.with_details(details),
            None => vacancy,
        })
    }

    /// 1パーティション分のテキストからストアを作る
    pub fn parse_partition(&self, partition: impl Into<String>, text: &str) -> VacancyResult<VacancyStore> {
        let table = self.parse_text(text)?;
        let vacancies = table
            .records
            .iter()
            .map(|record| self.build_vacancy(record))
            .collect::<VacancyResult<Vec<_>>>()?;

        Ok(VacancyStore::new(partition, vacancies).with_dropped_rows(table.dropped_rows))
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::standard()
    }
}

// nan や inf は数値として読めても金額ではない
fn parse_amount(record: &RawRecord, field: &str) -> VacancyResult<f64> {
    let raw = record.require(field)?;
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| VacancyError::invalid_value(field, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LookupKind;
    use crate::model::{Currency, Experience};

    const FULL_HEADER: &str = "name,description,key_skills,experience_id,premium,employer_name,salary_from,salary_to,salary_gross,salary_currency,area_name,published_at";

    fn full_csv(rows: &[&str]) -> String {
        let mut text = String::from(FULL_HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_empty_input_distinguishes_no_rows_and_header_only() {
        let parser = RecordParser::standard();

        let no_rows = parser.parse_text("").unwrap_err();
        assert!(matches!(
            no_rows,
            VacancyError::EmptyInput {
                kind: EmptyInputKind::NoRows
            }
        ));

        let header_only = parser.parse_text(FULL_HEADER).unwrap_err();
        assert!(matches!(
            header_only,
            VacancyError::EmptyInput {
                kind: EmptyInputKind::HeaderOnly
            }
        ));
    }

    #[test]
    fn test_rows_with_empty_cells_are_dropped() {
        let parser = RecordParser::standard();
        let text = "name,salary_from,salary_to,salary_currency,area_name,published_at\n\
                    Аналитик,100,200,RUR,Москва,2022-07-06T10:00:00+0300\n\
                    Тестировщик,,200,RUR,Москва,2022-07-06T10:00:00+0300\n\
                    Программист,100,200,RUR,Москва";

        let table = parser.parse_text(text).unwrap();

        assert_eq!(table.records.len(), 1);
        assert_eq!(table.dropped_rows, 2);
        assert_eq!(table.records[0].get("name"), Some("Аналитик"));
    }

    #[test]
    fn test_bom_and_markup_are_normalized() {
        let parser = RecordParser::standard();
        let text = "\u{feff}name,salary_from,salary_to,salary_currency,area_name,published_at\n\
                    \"<b>Аналитик</b>   данных\",100,200,RUR,Москва,2022-07-06T10:00:00+0300";

        let table = parser.parse_text(text).unwrap();

        assert_eq!(table.header[0], "name");
        assert_eq!(table.records[0].get("name"), Some("Аналитик данных"));
    }

    #[test]
    fn test_build_basic_vacancy() {
        let parser = RecordParser::standard();
        let record = RawRecord::from_pairs([
            ("name", "Аналитик"),
            ("salary_from", "10.0"),
            ("salary_to", "20"),
            ("salary_currency", "USD"),
            ("area_name", "Москва"),
            ("published_at", "2022-07-05T18:19:30+0300"),
        ]);

        let vacancy = parser.build_vacancy(&record).unwrap();

        assert_eq!(vacancy.title(), "Аналитик");
        assert_eq!(vacancy.salary().currency(), Currency::Usd);
        assert_eq!(vacancy.salary().currency_name(), "Доллары");
        assert_eq!(vacancy.salary().mid_ruble_value(), 909.9);
        assert_eq!(vacancy.published_year(), 2022);
        assert!(!vacancy.has_details());
    }

    #[test]
    fn test_build_extended_vacancy() {
        let parser = RecordParser::standard();
        let text = full_csv(&[
            "Аналитик,\"<p>Описание</p>\",\"SQL\nPython\",between1And3,True,Enface,100,200,True,RUR,Москва,2022-07-05T18:19:30+0300",
        ]);

        let store = parser.parse_partition("full.csv", &text).unwrap();
        let vacancy = &store.vacancies()[0];
        let details = vacancy.details("description").unwrap();

        assert_eq!(details.description, "Описание");
        assert_eq!(details.key_skills, vec!["SQL".to_string(), "Python".to_string()]);
        assert_eq!(details.experience, Experience::Between1And3);
        assert_eq!(details.experience_label, "От 1 года до 3 лет");
        assert!(details.premium);
        assert_eq!(details.premium_label, "Да");
        assert_eq!(details.employer, "Enface");
        assert!(vacancy.salary().is_gross_taxed());
    }

    #[test]
    fn test_unknown_enum_values_propagate() {
        let parser = RecordParser::standard();

        let bad_currency = full_csv(&[
            "Аналитик,Описание,SQL,between1And3,True,Enface,100,200,True,GBP,Москва,2022-07-05T18:19:30+0300",
        ]);
        let error = parser.parse_partition("a.csv", &bad_currency).unwrap_err();
        assert!(matches!(
            error,
            VacancyError::UnknownEnumValue {
                kind: LookupKind::Currency,
                ..
            }
        ));

        let bad_experience = full_csv(&[
            "Аналитик,Описание,SQL,forever,True,Enface,100,200,True,RUR,Москва,2022-07-05T18:19:30+0300",
        ]);
        let error = parser.parse_partition("a.csv", &bad_experience).unwrap_err();
        assert!(matches!(
            error,
            VacancyError::UnknownEnumValue {
                kind: LookupKind::Experience,
                ..
            }
        ));

        let bad_flag = full_csv(&[
            "Аналитик,Описание,SQL,between1And3,Maybe,Enface,100,200,True,RUR,Москва,2022-07-05T18:19:30+0300",
        ]);
        let error = parser.parse_partition("a.csv", &bad_flag).unwrap_err();
        assert!(matches!(
            error,
            VacancyError::UnknownEnumValue {
                kind: LookupKind::Boolean,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_amount_and_date() {
        let parser = RecordParser::standard();
        let mut record = RawRecord::from_pairs([
            ("name", "Аналитик"),
            ("salary_from", "много"),
            ("salary_to", "20"),
            ("salary_currency", "RUR"),
            ("area_name", "Москва"),
            ("published_at", "2022-07-05"),
        ]);

        let error = parser.build_vacancy(&record).unwrap_err();
        assert!(matches!(error, VacancyError::InvalidValue { ref field, .. } if field == "salary_from"));

        record.fields[1].1 = "10".to_string();
        let error = parser.build_vacancy(&record).unwrap_err();
        assert!(matches!(error, VacancyError::InvalidValue { ref field, .. } if field == "published_at"));
    }

    #[test]
    fn test_non_finite_amounts_are_rejected() {
        let parser = RecordParser::standard();

        for (field, raw) in [("salary_from", "nan"), ("salary_to", "inf"), ("salary_from", "-inf")] {
            let mut record = RawRecord::from_pairs([
                ("name", "Аналитик"),
                ("salary_from", "100"),
                ("salary_to", "100"),
                ("salary_currency", "RUR"),
                ("area_name", "Москва"),
                ("published_at", "2022-07-05T18:19:30+0300"),
            ]);
            let index = if field == "salary_from" { 1 } else { 2 };
            record.fields[index].1 = raw.to_string();

            let error = parser.build_vacancy(&record).unwrap_err();
            assert!(
                matches!(error, VacancyError::InvalidValue { field: ref f, value: ref v } if f == field && v == raw),
                "{field}={raw}: {error:?}"
            );
        }
    }

    #[test]
    fn test_injected_tables_are_used() {
        let tables = LookupTables::standard().with_rate(Currency::Usd, 100.0);
        let parser = RecordParser::new(Arc::new(tables));
        let record = RawRecord::from_pairs([
            ("name", "Аналитик"),
            ("salary_from", "10"),
            ("salary_to", "20"),
            ("salary_currency", "USD"),
            ("area_name", "Москва"),
            ("published_at", "2022-07-05T18:19:30+0300"),
        ]);

        let vacancy = parser.build_vacancy(&record).unwrap();
        assert_eq!(vacancy.salary().mid_ruble_value(), 1500.0);
    }
}
