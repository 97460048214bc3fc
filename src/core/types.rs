// パーティション処理に関連するデータ型定義

use super::error::VacancyError;
use crate::aggregation::PartialTally;

/// 1パーティション分の処理結果（ワーカーから送られる不変メッセージ）
#[derive(Debug)]
pub enum PartitionOutcome {
    Success {
        index: usize,
        partition: String,
        tally: PartialTally,
        dropped_rows: usize,
    },
    Failure {
        index: usize,
        partition: String,
        error: VacancyError,
    },
}

impl PartitionOutcome {
    pub fn index(&self) -> usize {
        match self {
            Self::Success { index, .. } | Self::Failure { index, .. } => *index,
        }
    }

    pub fn partition(&self) -> &str {
        match self {
            Self::Success { partition, .. } | Self::Failure { partition, .. } => partition,
        }
    }
}

/// 集計ジョブ全体のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationSummary {
    pub total_partitions: usize,
    pub total_vacancies: u64,
    pub dropped_rows: usize,
    pub elapsed_ms: u64,
}
