// コアレイヤー - 基盤となるトレイト、型、エラー定義

pub mod error;
pub mod traits;
pub mod types;

pub use error::{EmptyInputKind, ErrorContext, ErrorSeverity, LookupKind, VacancyError, VacancyResult};
pub use traits::{ProgressReporter, SchedulerConfig};
pub use types::{AggregationSummary, PartitionOutcome};
