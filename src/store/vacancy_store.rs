// VacancyStore - 1パーティション分の求人を順序付きで保持する

use super::fields::{FieldRegistry, SortKey, VacancyField};
use crate::core::error::{VacancyError, VacancyResult};
use crate::model::Vacancy;

/// 0始まりの番号付き射影
#[derive(Debug, Clone, Copy)]
pub struct NumberedVacancy<'a> {
    pub index: usize,
    pub vacancy: &'a Vacancy,
}

/// 求人ストア
#[derive(Debug, Clone, Default)]
pub struct VacancyStore {
    partition: String,
    vacancies: Vec<Vacancy>,
    dropped_rows: usize,
}

impl VacancyStore {
    pub fn new(partition: impl Into<String>, vacancies: Vec<Vacancy>) -> Self {
        Self {
            partition: partition.into(),
            vacancies,
            dropped_rows: 0,
        }
    }

    pub fn with_dropped_rows(mut self, dropped_rows: usize) -> Self {
        self.dropped_rows = dropped_rows;
        self
    }

    /// 複数ストアを与えられた順に連結する
    pub fn concat(partition: impl Into<String>, stores: impl IntoIterator<Item = VacancyStore>) -> Self {
        let mut merged = Self::new(partition, Vec::new());
        for store in stores {
            merged.dropped_rows += store.dropped_rows;
            merged.vacancies.extend(store.vacancies);
        }
        merged
    }

    pub fn partition(&self) -> &str {
        &self.partition
    }

    pub fn vacancies(&self) -> &[Vacancy] {
        &self.vacancies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vacancy> {
        self.vacancies.iter()
    }

    pub fn len(&self) -> usize {
        self.vacancies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vacancies.is_empty()
    }

    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// 安定ソート。等しい要素は元の順序を保つ（降順でも同様）
    pub fn sort(&mut self, field: VacancyField, descending: bool) -> VacancyResult<()> {
        self.sort_with(FieldRegistry::global(), field, descending)
    }

    pub fn sort_with(
        &mut self,
        registry: &FieldRegistry,
        field: VacancyField,
        descending: bool,
    ) -> VacancyResult<()> {
        let extractor = registry.sort_key(field)?;

        // キーを先に計算し、欠落フィールドがあれば並べ替え前に失敗させる
        let keys = self
            .vacancies
            .iter()
            .map(extractor)
            .collect::<VacancyResult<Vec<SortKey>>>()?;

        let mut keyed: Vec<(SortKey, Vacancy)> =
            keys.into_iter().zip(self.vacancies.drain(..)).collect();
        keyed.sort_by(|(a, _), (b, _)| {
            let ordering = a.cmp(b);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });

        self.vacancies = keyed.into_iter().map(|(_, vacancy)| vacancy).collect();
        Ok(())
    }

    /// 全件の番号付き射影
    pub fn all_rows(&self) -> Vec<NumberedVacancy<'_>> {
        self.vacancies
            .iter()
            .enumerate()
            .map(|(index, vacancy)| NumberedVacancy { index, vacancy })
            .collect()
    }

    /// 1つの述語で絞り込んだ番号付き射影。0件なら NoMatches
    pub fn filtered_rows(&self, field: VacancyField, value: &str) -> VacancyResult<Vec<NumberedVacancy<'_>>> {
        self.filtered_rows_with(FieldRegistry::global(), field, value)
    }

    pub fn filtered_rows_with(
        &self,
        registry: &FieldRegistry,
        field: VacancyField,
        value: &str,
    ) -> VacancyResult<Vec<NumberedVacancy<'_>>> {
        let predicate = registry.predicate(field)?;

        let mut rows = Vec::new();
        for vacancy in &self.vacancies {
            if predicate(vacancy, value)? {
                rows.push(NumberedVacancy {
                    index: rows.len(),
                    vacancy,
                });
            }
        }

        if rows.is_empty() {
            return Err(VacancyError::no_matches(field.heading(), value));
        }
        Ok(rows)
    }
}

impl<'a> IntoIterator for &'a VacancyStore {
    type Item = &'a Vacancy;
    type IntoIter = std::slice::Iter<'a, Vacancy>;

    fn into_iter(self) -> Self::IntoIter {
        self.vacancies.iter()
    }
}
