// AggregationEngine - 年別・職種別・地域別の統計

pub mod engine;
pub mod stats;
pub mod tally;

pub use engine::{AggregationEngine, REGION_SHARE_THRESHOLD, TOP_REGIONS};
pub use stats::{AggregateStats, RegionStat, YearSummary, YearlyStat};
pub use tally::{PartialTally, SalaryTally, YearTally};
