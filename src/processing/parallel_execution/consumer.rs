// Consumer - 並列ワーカー

use super::producer::WorkItem;
use crate::aggregation::AggregationEngine;
use crate::core::error::VacancyResult;
use crate::core::types::PartitionOutcome;
use crate::parser::RecordParser;
use crate::processing::worker::process_partition;
use crate::storage::StorageBackend;
use std::sync::Arc;
use tokio::sync::mpsc;

/// ワーカーが共有する読み取り専用の依存
pub struct WorkerContext<S: ?Sized> {
    pub storage: Arc<S>,
    pub parser: Arc<RecordParser>,
    pub engine: Arc<AggregationEngine>,
}

impl<S: ?Sized> Clone for WorkerContext<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            parser: Arc::clone(&self.parser),
            engine: Arc::clone(&self.engine),
        }
    }
}

/// 単一Consumerワーカー
pub fn spawn_single_consumer<S>(
    worker_id: usize,
    context: WorkerContext<S>,
    work_rx: Arc<tokio::sync::Mutex<mpsc::Receiver<WorkItem>>>,
    result_tx: mpsc::Sender<PartitionOutcome>,
) -> tokio::task::JoinHandle<VacancyResult<()>>
where
    S: StorageBackend + ?Sized + 'static,
{
    tokio::spawn(async move {
        loop {
            let (index, id) = {
                let mut rx = work_rx.lock().await;
                match rx.recv().await {
                    Some(item) => item,
                    None => break,
                }
            };

            tracing::trace!(worker_id, index, partition = %id, "worker picked partition");

            let outcome = process_partition(
                context.storage.as_ref(),
                Arc::clone(&context.parser),
                Arc::clone(&context.engine),
                index,
                &id,
            )
            .await;

            if result_tx.send(outcome).await.is_err() {
                // Collector が中断した
                break;
            }
        }
        Ok(())
    })
}

/// Consumers: 並列ワーカープール
pub fn spawn_consumers<S>(
    context: WorkerContext<S>,
    work_rx: mpsc::Receiver<WorkItem>,
    result_tx: mpsc::Sender<PartitionOutcome>,
    worker_count: usize,
) -> Vec<tokio::task::JoinHandle<VacancyResult<()>>>
where
    S: StorageBackend + ?Sized + 'static,
{
    let work_rx = Arc::new(tokio::sync::Mutex::new(work_rx));

    (0..worker_count)
        .map(|worker_id| {
            spawn_single_consumer(
                worker_id,
                context.clone(),
                Arc::clone(&work_rx),
                result_tx.clone(),
            )
        })
        .collect()
}
