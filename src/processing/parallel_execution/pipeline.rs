// Pipeline - Producer / Consumer / Collector のオーケストレーション

use super::collector::spawn_result_collector;
use super::consumer::{spawn_consumers, WorkerContext};
use super::producer::{spawn_producer, WorkItem};
use crate::aggregation::{AggregationEngine, PartialTally};
use crate::core::error::VacancyResult;
use crate::core::traits::{ProgressReporter, SchedulerConfig};
use crate::core::types::AggregationSummary;
use crate::storage::StorageBackend;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// パーティション集計パイプライン
pub struct PartitionPipeline<S: ?Sized> {
    context: WorkerContext<S>,
}

impl<S> PartitionPipeline<S>
where
    S: StorageBackend + ?Sized + 'static,
{
    pub fn new(context: WorkerContext<S>) -> Self {
        Self { context }
    }

    /// 全パーティションを集計し、番号順に合算した部分集計を返す
    ///
    /// マージは全ワーカーの終了後に呼び出し元のタスクで行う。
    pub async fn execute<C, R>(
        &self,
        partitions: Vec<String>,
        config: &C,
        reporter: std::sync::Arc<R>,
    ) -> VacancyResult<(PartialTally, AggregationSummary)>
    where
        C: SchedulerConfig + ?Sized,
        R: ProgressReporter + ?Sized + 'static,
    {
        let start_time = Instant::now();
        let total_partitions = partitions.len();
        let worker_count = config.max_workers().min(total_partitions.max(1));

        let (work_tx, work_rx) = mpsc::channel::<WorkItem>(config.channel_buffer_size());
        let (result_tx, result_rx) = mpsc::channel(config.channel_buffer_size());

        reporter.report_started(total_partitions).await;
        debug!(total_partitions, worker_count, "pipeline started");

        let producer_handle = spawn_producer(partitions, work_tx);
        let consumer_handles =
            spawn_consumers(self.context.clone(), work_rx, result_tx, worker_count);
        let collector_handle =
            spawn_result_collector(result_rx, total_partitions, reporter.clone());

        // Collector が最初の失敗で返ってきたら残りを中断する
        let collected = match collector_handle.await? {
            Ok(collected) => collected,
            Err(error) => {
                warn!(%error, "aborting remaining partition workers");
                producer_handle.abort();
                for handle in &consumer_handles {
                    handle.abort();
                }
                return Err(error);
            }
        };

        producer_handle.await??;
        for handle in consumer_handles {
            handle.await??;
        }

        let merged = AggregationEngine::merge_all(collected.tallies)?;

        reporter
            .report_completed(merged.total(), collected.dropped_rows)
            .await;

        let summary = AggregationSummary {
            total_partitions,
            total_vacancies: merged.total(),
            dropped_rows: collected.dropped_rows,
            elapsed_ms: start_time.elapsed().as_millis() as u64,
        };

        Ok((merged, summary))
    }
}
