pub mod aggregation;
pub mod cli;
pub mod core;
pub mod file_scanner;
pub mod logging;
pub mod model;
pub mod parser;
pub mod partition;
pub mod processing;
pub mod query;
pub mod report;
pub mod storage;
pub mod store;

use crate::aggregation::{AggregateStats, AggregationEngine};
use crate::core::error::{VacancyError, VacancyResult};
use crate::core::traits::{ProgressReporter, SchedulerConfig};
use crate::core::types::AggregationSummary;
use crate::parser::RecordParser;
use crate::partition::{SplitPartition, YearSplitter};
use crate::processing::PartitionScheduler;
use crate::query::{TableQuery, TableView};
use crate::storage::StorageBackend;
use crate::store::VacancyStore;
use std::sync::Arc;
use tracing::info;

// 依存関係を直接所有するアプリケーション構造体
// ストレージはArcで共有し、並列処理のワーカーにも渡す
pub struct App<S>
where
    S: StorageBackend + ?Sized,
{
    pub storage: Arc<S>,
    parser: Arc<RecordParser>,
}

impl<S> App<S>
where
    S: StorageBackend + ?Sized + 'static,
{
    /// 新しいAppインスタンスを作成（コンストラクタインジェクション）
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            parser: Arc::new(RecordParser::standard()),
        }
    }

    pub fn parser(&self) -> &RecordParser {
        &self.parser
    }

    /// 1ファイルを読み込んでストアを作る
    pub async fn load_store(&self, file: &str) -> VacancyResult<VacancyStore> {
        let bytes = self
            .storage
            .read_item(file)
            .await
            .map_err(|e| VacancyError::storage(file, e))?;
        let text =
            String::from_utf8(bytes).map_err(|_| VacancyError::invalid_value("encoding", file))?;

        self.parser.parse_partition(file, &text)
    }

    /// 1ファイルを逐次集計する
    pub async fn run(&self, file: &str, job_name: &str) -> VacancyResult<AggregateStats> {
        let store = self.load_store(file).await?;
        info!(file, rows = store.len(), dropped = store.dropped_rows(), "file parsed");

        AggregationEngine::new(job_name).analyze(&store)
    }

    /// ディレクトリ内のパーティションを並列集計する
    pub async fn run_parallel<C, R>(
        &self,
        directory: &str,
        job_name: &str,
        config: C,
        reporter: Arc<R>,
    ) -> VacancyResult<(AggregateStats, AggregationSummary)>
    where
        C: SchedulerConfig,
        R: ProgressReporter + ?Sized + 'static,
    {
        let scheduler = PartitionScheduler::new(Arc::clone(&self.storage), config, reporter)
            .with_parser((*self.parser).clone());
        scheduler
            .aggregate_directory(directory, AggregationEngine::new(job_name))
            .await
    }

    /// 指定したファイル群をパーティションとして並列集計する（ディレクトリは走査しない）
    pub async fn run_partitions<C, R>(
        &self,
        files: Vec<String>,
        job_name: &str,
        config: C,
        reporter: Arc<R>,
    ) -> VacancyResult<(AggregateStats, AggregationSummary)>
    where
        C: SchedulerConfig,
        R: ProgressReporter + ?Sized + 'static,
    {
        let scheduler = PartitionScheduler::new(Arc::clone(&self.storage), config, reporter)
            .with_parser((*self.parser).clone());
        scheduler
            .aggregate_partitions(files, AggregationEngine::new(job_name))
            .await
    }

    /// 1ファイルに表クエリを実行する
    pub async fn table(&self, file: &str, query: &TableQuery) -> VacancyResult<TableView> {
        let mut store = self.load_store(file).await?;
        query.execute(&mut store)
    }

    /// ソースを年別パーティションに分割する（古いパーティションは先に削除）
    pub async fn split(&self, source: &str, out_dir: &str) -> VacancyResult<Vec<SplitPartition>> {
        let splitter = YearSplitter::new(Arc::clone(&self.storage));
        splitter.clear_partitions(out_dir).await?;
        splitter.split(source, out_dir).await
    }
}
