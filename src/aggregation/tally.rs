// 部分集計 - パーティション単位の加算可能なカウンタ
//
// 平均は保持せず、件数と合計だけを持つ。合計はマイクロルーブル整数なので
// マージの順序や分割の仕方によって結果が変わらない。

use crate::core::error::{VacancyError, VacancyResult};
use crate::model::salary::MICROS_PER_RUBLE;
use std::collections::{BTreeMap, HashMap};

/// 件数と給与合計の組
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalaryTally {
    pub count: u64,
    pub salary_micros: i128,
}

impl SalaryTally {
    /// 1件を加算する。溢れた場合はマージと同じ `MergeFailure` を返す
    pub fn record(&mut self, salary_micros: i128, key: &str) -> VacancyResult<()> {
        *self = self.merged(
            SalaryTally {
                count: 1,
                salary_micros,
            },
            key,
        )?;
        Ok(())
    }

    /// 切り捨て平均（ルーブル）。件数0なら0
    pub fn average_rubles(&self) -> VacancyResult<i64> {
        if self.count == 0 {
            return Ok(0);
        }
        let divisor = i128::from(self.count) * MICROS_PER_RUBLE;
        i64::try_from(self.salary_micros / divisor)
            .map_err(|_| VacancyError::merge_failure("average", "平均値が i64 の範囲外"))
    }

    fn merged(self, other: SalaryTally, key: &str) -> VacancyResult<SalaryTally> {
        let count = self
            .count
            .checked_add(other.count)
            .ok_or_else(|| VacancyError::merge_failure(key, "件数のオーバーフロー"))?;
        let salary_micros = self
            .salary_micros
            .checked_add(other.salary_micros)
            .ok_or_else(|| VacancyError::merge_failure(key, "給与合計のオーバーフロー"))?;

        Ok(SalaryTally {
            count,
            salary_micros,
        })
    }
}

/// 年ごとの全体と職種別のカウンタ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearTally {
    pub all: SalaryTally,
    pub job: SalaryTally,
}

/// 1つ以上のパーティションの部分集計
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialTally {
    years: BTreeMap<i32, YearTally>,
    regions: Vec<(String, SalaryTally)>,
    region_index: HashMap<String, usize>,
    total: u64,
}

impl PartialTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1件の求人を加算する。地域カウンタは職種で絞り込まない
    pub fn record(
        &mut self,
        year: i32,
        region: &str,
        salary_micros: i128,
        job_match: bool,
    ) -> VacancyResult<()> {
        let key = format!("year {year}");
        let year_tally = self.years.entry(year).or_default();
        year_tally.all.record(salary_micros, &key)?;
        if job_match {
            year_tally.job.record(salary_micros, &key)?;
        }

        self.region_entry(region).record(salary_micros, region)?;
        self.total = self
            .total
            .checked_add(1)
            .ok_or_else(|| VacancyError::merge_failure("total", "総件数のオーバーフロー"))?;
        Ok(())
    }

    fn region_entry(&mut self, region: &str) -> &mut SalaryTally {
        let index = match self.region_index.get(region) {
            Some(&index) => index,
            None => {
                let index = self.regions.len();
                self.regions.push((region.to_string(), SalaryTally::default()));
                self.region_index.insert(region.to_string(), index);
                index
            }
        };
        &mut self.regions[index].1
    }

    /// 2つの部分集計を合算する
    ///
    /// 地域の初出順は `self` が先、続いて `other` で新たに現れたもの。
    pub fn merge(mut self, other: PartialTally) -> VacancyResult<PartialTally> {
        for (year, tally) in other.years {
            let entry = self.years.entry(year).or_default();
            let key = format!("year {year}");
            entry.all = entry.all.merged(tally.all, &key)?;
            entry.job = entry.job.merged(tally.job, &key)?;
        }

        for (region, tally) in other.regions {
            let entry = self.region_entry(&region);
            *entry = entry.merged(tally, &region)?;
        }

        self.total = self
            .total
            .checked_add(other.total)
            .ok_or_else(|| VacancyError::merge_failure("total", "総件数のオーバーフロー"))?;

        Ok(self)
    }

    pub fn years(&self) -> &BTreeMap<i32, YearTally> {
        &self.years
    }

    /// 初出順の地域カウンタ
    pub fn regions(&self) -> &[(String, SalaryTally)] {
        &self.regions
    }

    pub fn region(&self, name: &str) -> Option<&SalaryTally> {
        self.region_index.get(name).map(|&index| &self.regions[index].1)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
