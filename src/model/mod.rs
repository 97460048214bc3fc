// レコードモデル - 給与レンジ・求人・固定ルックアップテーブル

pub mod lookup;
pub mod salary;
pub mod vacancy;

pub use lookup::{Currency, CurrencyEntry, Experience, LookupTables};
pub use salary::SalaryRange;
pub use vacancy::{Vacancy, VacancyDetails};
