// Worker - 単一パーティションの解析と部分集計

use crate::aggregation::AggregationEngine;
use crate::core::error::{VacancyError, VacancyResult};
use crate::core::types::PartitionOutcome;
use crate::parser::RecordParser;
use crate::storage::StorageBackend;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// パーティションの表示名（ファイル名部分）
pub fn partition_name(id: &str) -> String {
    Path::new(id)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| id.to_string())
}

/// 1パーティションを読み込み、解析し、部分集計を作る
///
/// 失敗してもパニックせず `PartitionOutcome::Failure` として返す。
pub async fn process_partition<S>(
    storage: &S,
    parser: Arc<RecordParser>,
    engine: Arc<AggregationEngine>,
    index: usize,
    id: &str,
) -> PartitionOutcome
where
    S: StorageBackend + ?Sized,
{
    let partition = partition_name(id);

    let result = async {
        let bytes = storage
            .read_item(id)
            .await
            .map_err(|e| VacancyError::storage(id, e))?;
        let text = String::from_utf8(bytes)
            .map_err(|_| VacancyError::invalid_value("encoding", id))?;

        // CPUバウンドな解析と集計はブロッキングスレッドで行う
        let name = partition.clone();
        tokio::task::spawn_blocking(move || {
            let store = parser.parse_partition(name, &text)?;
            let tally = engine.accumulate(&store)?;
            VacancyResult::Ok((tally, store.dropped_rows()))
        })
        .await?
    }
    .await;

    match result {
        Ok((tally, dropped_rows)) => {
            debug!(index, partition = %partition, vacancies = tally.total(), "partition done");
            PartitionOutcome::Success {
                index,
                partition,
                tally,
                dropped_rows,
            }
        }
        Err(error) => PartitionOutcome::Failure {
            index,
            partition,
            error,
        },
    }
}
