// VacancyStore とフィールドレジストリ

pub mod fields;
pub mod vacancy_store;

pub use fields::{FieldRegistry, KeyExtractor, Predicate, SortKey, VacancyField};
pub use vacancy_store::{NumberedVacancy, VacancyStore};
