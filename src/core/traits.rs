// パーティション並列集計のトレイト定義
// スケジューラ設定と進捗報告を抽象化する

use async_trait::async_trait;
use mockall::automock;

/// スケジューラの設定を抽象化するトレイト
#[automock]
pub trait SchedulerConfig: Send + Sync {
    /// ワーカータスク数
    fn max_workers(&self) -> usize;

    /// 作業チャンネルのバッファサイズ
    fn channel_buffer_size(&self) -> usize;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

impl SchedulerConfig for Box<dyn SchedulerConfig> {
    fn max_workers(&self) -> usize {
        self.as_ref().max_workers()
    }

    fn channel_buffer_size(&self) -> usize {
        self.as_ref().channel_buffer_size()
    }

    fn enable_progress_reporting(&self) -> bool {
        self.as_ref().enable_progress_reporting()
    }
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 集計開始時の報告
    async fn report_started(&self, total_partitions: usize);

    /// パーティション完了ごとの報告
    async fn report_progress(&self, completed: usize, total: usize);

    /// パーティション失敗時の報告
    async fn report_error(&self, partition: &str, error: &str);

    /// 集計完了時の報告
    async fn report_completed(&self, total_vacancies: u64, dropped_rows: usize);
}

#[async_trait]
impl ProgressReporter for Box<dyn ProgressReporter> {
    async fn report_started(&self, total_partitions: usize) {
        self.as_ref().report_started(total_partitions).await
    }

    async fn report_progress(&self, completed: usize, total: usize) {
        self.as_ref().report_progress(completed, total).await
    }

    async fn report_error(&self, partition: &str, error: &str) {
        self.as_ref().report_error(partition, error).await
    }

    async fn report_completed(&self, total_vacancies: u64, dropped_rows: usize) {
        self.as_ref().report_completed(total_vacancies, dropped_rows).await
    }
}
