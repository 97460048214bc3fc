// AggregationEngine - 部分集計の作成・合算・確定

use super::stats::{AggregateStats, RegionStat, YearSummary, YearlyStat};
use super::tally::PartialTally;
use crate::core::error::VacancyResult;
use crate::store::VacancyStore;
use tracing::debug;

/// この値未満のシェアの地域は結果から除外する
pub const REGION_SHARE_THRESHOLD: f64 = 0.01;

/// 地域ランキングの件数
pub const TOP_REGIONS: usize = 10;

/// 職種名を保持する集計エンジン
#[derive(Debug, Clone)]
pub struct AggregationEngine {
    job_name: String,
}

impl AggregationEngine {
    pub fn new(job_name: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
        }
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    /// 大文字小文字を区別する部分一致
    pub fn matches_job(&self, title: &str) -> bool {
        title.contains(self.job_name.as_str())
    }

    /// 1パーティションを1回走査して部分集計を作る
    pub fn accumulate(&self, store: &VacancyStore) -> VacancyResult<PartialTally> {
        let mut tally = PartialTally::new();
        for vacancy in store {
            tally.record(
                vacancy.published_year(),
                vacancy.region(),
                vacancy.salary().mid_ruble_micros(),
                self.matches_job(vacancy.title()),
            )?;
        }
        debug!(
            partition = store.partition(),
            vacancies = tally.total(),
            "partition accumulated"
        );
        Ok(tally)
    }

    /// 与えられた順に部分集計を合算する
    pub fn merge_all<I>(partials: I) -> VacancyResult<PartialTally>
    where
        I: IntoIterator<Item = PartialTally>,
    {
        partials
            .into_iter()
            .try_fold(PartialTally::new(), |acc, partial| acc.merge(partial))
    }

    /// 平均・シェアを計算し、除外とランキングを適用する
    pub fn finalize(&self, tally: &PartialTally) -> VacancyResult<AggregateStats> {
        let years = tally
            .years()
            .iter()
            .map(|(&year, counts)| {
                Ok(YearSummary {
                    year,
                    all: YearlyStat {
                        count: counts.all.count,
                        average_salary: counts.all.average_rubles()?,
                    },
                    job: YearlyStat {
                        count: counts.job.count,
                        average_salary: counts.job.average_rubles()?,
                    },
                })
            })
            .collect::<VacancyResult<Vec<_>>>()?;

        let total = tally.total();
        let mut regions = Vec::new();
        for (name, counts) in tally.regions() {
            let share = round_share(counts.count as f64 / total as f64);
            if share < REGION_SHARE_THRESHOLD {
                continue;
            }
            regions.push(RegionStat {
                region: name.clone(),
                average_salary: counts.average_rubles()?,
                share,
            });
        }

        let mut by_salary: Vec<(String, i64)> = regions
            .iter()
            .map(|r| (r.region.clone(), r.average_salary))
            .collect();
        // 安定ソートなので同値は初出順のまま
        by_salary.sort_by(|a, b| b.1.cmp(&a.1));
        by_salary.truncate(TOP_REGIONS);

        let mut by_share: Vec<(String, f64)> =
            regions.iter().map(|r| (r.region.clone(), r.share)).collect();
        by_share.sort_by(|a, b| b.1.total_cmp(&a.1));
        by_share.truncate(TOP_REGIONS);

        Ok(AggregateStats {
            job_name: self.job_name.clone(),
            total_vacancies: total,
            years,
            regions,
            salary_by_region: by_salary,
            share_by_region: by_share,
        })
    }

    /// 逐次モード: 1ストアを集計して確定する
    pub fn analyze(&self, store: &VacancyStore) -> VacancyResult<AggregateStats> {
        self.finalize(&self.accumulate(store)?)
    }
}

fn round_share(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
