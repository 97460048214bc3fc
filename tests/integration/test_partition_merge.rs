// パーティション分割の仕方によらず、並列集計の結果が逐次集計と一致することを確認する
#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::*;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;
use tempfile::TempDir;
use vacancy_stats::aggregation::{AggregateStats, AggregationEngine};
use vacancy_stats::parser::RecordParser;
use vacancy_stats::processing::NoOpProgressReporter;
use vacancy_stats::storage::local::LocalStorageBackend;
use vacancy_stats::App;

const JOB: &str = "Аналитик";
const ROWS: usize = SMALL_VALID_ROWS + SMALL_DROPPED_ROWS;

fn sequential() -> AggregateStats {
    let store = RecordParser::standard()
        .parse_partition("small", SMALL_CSV)
        .unwrap();
    AggregationEngine::new(JOB).analyze(&store).unwrap()
}

fn partitioned(groups: &[Vec<usize>], workers: usize) -> AggregateStats {
    let temp_dir = TempDir::new().unwrap();
    write_partitions(temp_dir.path(), SMALL_CSV, groups);

    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(async {
        let app = App::new(Arc::new(LocalStorageBackend::new()));
        let (stats, summary) = app
            .run_parallel(
                temp_dir.path().to_str().unwrap(),
                JOB,
                quiet_config(workers),
                Arc::new(NoOpProgressReporter::new()),
            )
            .await
            .unwrap();
        assert_eq!(summary.total_partitions, groups.len());
        assert_eq!(summary.dropped_rows, SMALL_DROPPED_ROWS);
        stats
    })
}

/// 切れ目の集合から連続した行グループを作る
fn contiguous_groups(cuts: &BTreeSet<usize>) -> Vec<Vec<usize>> {
    let mut bounds: Vec<usize> = vec![0];
    bounds.extend(cuts.iter().copied());
    bounds.push(ROWS);
    bounds.windows(2).map(|w| (w[0]..w[1]).collect()).collect()
}

/// 行ごとの割り当てからグループを作る（空のグループは除く）
fn assigned_groups(assignment: &[usize]) -> Vec<Vec<usize>> {
    let count = assignment.iter().copied().max().unwrap_or(0) + 1;
    (0..count)
        .map(|group| {
            assignment
                .iter()
                .enumerate()
                .filter(|&(_, &g)| g == group)
                .map(|(row, _)| row)
                .collect::<Vec<_>>()
        })
        .filter(|rows| !rows.is_empty())
        .collect()
}

#[test]
fn test_single_partition_matches_sequential() {
    let all: Vec<usize> = (0..ROWS).collect();
    assert_eq!(partitioned(&[all], 1), sequential());
}

#[test]
fn test_one_row_per_partition_matches_sequential() {
    let groups: Vec<Vec<usize>> = (0..ROWS).map(|row| vec![row]).collect();
    assert_eq!(partitioned(&groups, 4), sequential());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_contiguous_partitions_match_sequential(
        cuts in prop::collection::btree_set(1usize..ROWS, 0..6),
        workers in 1usize..5,
    ) {
        let groups = contiguous_groups(&cuts);
        prop_assert_eq!(partitioned(&groups, workers), sequential());
    }

    #[test]
    fn prop_shuffled_partitions_match_sequential(
        assignment in prop::collection::vec(0usize..4, ROWS),
        workers in 1usize..5,
    ) {
        // 行の並びが変わると地域の初出順は変わりうるが、値とランキングは変わらない
        let groups = assigned_groups(&assignment);
        let parallel = partitioned(&groups, workers);
        let expected = sequential();

        prop_assert_eq!(parallel.total_vacancies, expected.total_vacancies);
        prop_assert_eq!(&parallel.years, &expected.years);
        prop_assert_eq!(&parallel.salary_by_region, &expected.salary_by_region);
        prop_assert_eq!(&parallel.share_by_region, &expected.share_by_region);
    }
}
