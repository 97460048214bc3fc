// Collector - 結果収集

use crate::aggregation::PartialTally;
use crate::core::error::{VacancyError, VacancyResult};
use crate::core::traits::ProgressReporter;
use crate::core::types::PartitionOutcome;
use std::sync::Arc;
use tokio::sync::mpsc;

/// パーティション番号順に並べた部分集計
#[derive(Debug, Default)]
pub struct CollectedPartials {
    pub tallies: Vec<PartialTally>,
    pub dropped_rows: usize,
}

/// Collector: 完了順に届く結果を番号のスロットに格納する
///
/// 最初の失敗で中断し、`PartitionWorkerFailure` を返す。
pub fn spawn_result_collector<R>(
    mut result_rx: mpsc::Receiver<PartitionOutcome>,
    total_partitions: usize,
    reporter: Arc<R>,
) -> tokio::task::JoinHandle<VacancyResult<CollectedPartials>>
where
    R: ProgressReporter + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut slots: Vec<Option<PartialTally>> = (0..total_partitions).map(|_| None).collect();
        let mut dropped_rows = 0;
        let mut completed = 0;

        while let Some(outcome) = result_rx.recv().await {
            match outcome {
                PartitionOutcome::Success {
                    index,
                    partition,
                    tally,
                    dropped_rows: dropped,
                } => {
                    let slot = slots.get_mut(index).ok_or_else(|| {
                        VacancyError::channel(format!("範囲外のパーティション番号: {index} ({partition})"))
                    })?;
                    *slot = Some(tally);
                    dropped_rows += dropped;
                    completed += 1;
                    reporter.report_progress(completed, total_partitions).await;
                }
                PartitionOutcome::Failure {
                    partition, error, ..
                } => {
                    reporter.report_error(&partition, &error.to_string()).await;
                    return Err(VacancyError::partition_failure(partition, error));
                }
            }
        }

        let tallies = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| {
                    VacancyError::channel(format!("パーティション {index} の結果が届いていません"))
                })
            })
            .collect::<VacancyResult<Vec<_>>>()?;

        Ok(CollectedPartials {
            tallies,
            dropped_rows,
        })
    })
}
