// PartitionScheduler - 依存性注入による並列集計エンジン
// ストレージ・設定・進捗報告はコンストラクタで注入する

use super::consumer::WorkerContext;
use super::pipeline::PartitionPipeline;
use crate::aggregation::{AggregateStats, AggregationEngine};
use crate::core::error::{VacancyError, VacancyResult};
use crate::core::traits::{ProgressReporter, SchedulerConfig};
use crate::core::types::AggregationSummary;
use crate::parser::RecordParser;
use crate::processing::config::validate_config;
use crate::storage::StorageBackend;
use std::sync::Arc;
use tracing::info;

/// パーティション分割された入力を並列に集計するスケジューラ
pub struct PartitionScheduler<S, C, R>
where
    S: ?Sized,
    R: ?Sized,
{
    storage: Arc<S>,
    config: C,
    reporter: Arc<R>,
    parser: Arc<RecordParser>,
}

impl<S, C, R> PartitionScheduler<S, C, R>
where
    S: StorageBackend + ?Sized + 'static,
    C: SchedulerConfig,
    R: ProgressReporter + ?Sized + 'static,
{
    pub fn new(storage: Arc<S>, config: C, reporter: Arc<R>) -> Self {
        Self {
            storage,
            config,
            reporter,
            parser: Arc::new(RecordParser::standard()),
        }
    }

    /// ルックアップテーブルを差し替えたパーサーを使う
    pub fn with_parser(mut self, parser: RecordParser) -> Self {
        self.parser = Arc::new(parser);
        self
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// ディレクトリ直下のCSVをパス順で列挙する
    pub async fn discover_partitions(&self, directory: &str) -> VacancyResult<Vec<String>> {
        validate_config(&self.config)?;

        let items = self
            .storage
            .list_items(directory)
            .await
            .map_err(|e| VacancyError::file_discovery(directory, e))?;

        let mut partitions: Vec<String> = items
            .into_iter()
            .filter(|item| self.storage.is_partition_file(item))
            .map(|item| item.id)
            .collect();
        partitions.sort();

        info!(directory, count = partitions.len(), "partitions discovered");
        Ok(partitions)
    }

    /// ディレクトリを発見から確定まで集計する
    pub async fn aggregate_directory(
        &self,
        directory: &str,
        engine: AggregationEngine,
    ) -> VacancyResult<(AggregateStats, AggregationSummary)> {
        let partitions = self.discover_partitions(directory).await?;
        self.aggregate_partitions(partitions, engine).await
    }

    /// 指定されたパーティション列を集計する（列の順序がマージ順になる）
    pub async fn aggregate_partitions(
        &self,
        partitions: Vec<String>,
        engine: AggregationEngine,
    ) -> VacancyResult<(AggregateStats, AggregationSummary)> {
        validate_config(&self.config)?;

        let engine = Arc::new(engine);
        let pipeline = PartitionPipeline::new(WorkerContext {
            storage: Arc::clone(&self.storage),
            parser: Arc::clone(&self.parser),
            engine: Arc::clone(&engine),
        });

        let reporter = Arc::clone(&self.reporter);
        let (merged, summary) = if self.config.enable_progress_reporting() {
            pipeline.execute(partitions, &self.config, reporter).await?
        } else {
            let silent = Arc::new(crate::processing::reporting::NoOpProgressReporter::new());
            pipeline.execute(partitions, &self.config, silent).await?
        };

        // 確定はすべてのワーカー終了後に制御タスク上で行う
        let stats = engine.finalize(&merged)?;
        Ok((stats, summary))
    }
}
