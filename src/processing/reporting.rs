// 進捗報告の実装

use crate::core::traits::ProgressReporter;
use async_trait::async_trait;

/// コンソール出力による進捗報告実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleProgressReporter {
    quiet: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

#[async_trait]
impl ProgressReporter for ConsoleProgressReporter {
    async fn report_started(&self, total_partitions: usize) {
        if !self.quiet {
            println!("🚀 Aggregating {total_partitions} partitions...");
        }
    }

    async fn report_progress(&self, completed: usize, total: usize) {
        if !self.quiet {
            let percentage = if total == 0 {
                100.0
            } else {
                (completed as f64 / total as f64) * 100.0
            };
            println!("📊 Progress: {completed}/{total} ({percentage:.1}%)");
        }
    }

    async fn report_error(&self, partition: &str, error: &str) {
        if !self.quiet {
            eprintln!("❌ Error in partition {partition}: {error}");
        }
    }

    async fn report_completed(&self, total_vacancies: u64, dropped_rows: usize) {
        if !self.quiet {
            println!("✅ Completed! Vacancies: {total_vacancies}, dropped rows: {dropped_rows}");
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_partitions: usize) {}

    async fn report_progress(&self, _completed: usize, _total: usize) {}

    async fn report_error(&self, _partition: &str, _error: &str) {}

    async fn report_completed(&self, _total_vacancies: u64, _dropped_rows: usize) {}
}
