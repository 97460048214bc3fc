// 確定済みの集計結果

use serde::Serialize;
use std::collections::BTreeMap;

/// 年ごとの件数と平均給与
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct YearlyStat {
    pub count: u64,
    pub average_salary: i64,
}

/// 1年分の全体統計と職種別統計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearSummary {
    pub year: i32,
    pub all: YearlyStat,
    pub job: YearlyStat,
}

/// 地域ごとの平均給与とシェア
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionStat {
    pub region: String,
    pub average_salary: i64,
    pub share: f64,
}

/// AggregationEngine の最終出力
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    pub job_name: String,
    pub total_vacancies: u64,
    /// 年の昇順
    pub years: Vec<YearSummary>,
    /// シェア1%以上の地域（初出順）
    pub regions: Vec<RegionStat>,
    /// 平均給与の降順、上位10件
    pub salary_by_region: Vec<(String, i64)>,
    /// シェアの降順、上位10件
    pub share_by_region: Vec<(String, f64)>,
}

impl AggregateStats {
    pub fn salary_by_years(&self) -> BTreeMap<i32, i64> {
        self.years.iter().map(|y| (y.year, y.all.average_salary)).collect()
    }

    pub fn count_by_years(&self) -> BTreeMap<i32, u64> {
        self.years.iter().map(|y| (y.year, y.all.count)).collect()
    }

    pub fn salary_by_years_job(&self) -> BTreeMap<i32, i64> {
        self.years.iter().map(|y| (y.year, y.job.average_salary)).collect()
    }

    pub fn count_by_years_job(&self) -> BTreeMap<i32, u64> {
        self.years.iter().map(|y| (y.year, y.job.count)).collect()
    }

    pub fn year(&self, year: i32) -> Option<&YearSummary> {
        self.years.iter().find(|y| y.year == year)
    }

    pub fn region(&self, name: &str) -> Option<&RegionStat> {
        self.regions.iter().find(|r| r.region == name)
    }

    pub fn is_empty(&self) -> bool {
        self.total_vacancies == 0
    }
}
