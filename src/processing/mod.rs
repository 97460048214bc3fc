// パーティション並列集計のモジュール

pub mod config;
pub mod parallel_execution;
pub mod reporting;
pub mod worker;

pub use config::{validate_config, DefaultSchedulerConfig, StatsSettings};
pub use parallel_execution::PartitionScheduler;
pub use reporting::{ConsoleProgressReporter, NoOpProgressReporter};
