use crate::aggregation::AggregateStats;
use crate::core::error::{VacancyError, VacancyResult};
use crate::processing::{ConsoleProgressReporter, StatsSettings};
use crate::report::{ReportProjector, ReportTables};
use crate::storage::local::LocalStorageBackend;
use crate::App;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Configuration struct for stats command to reduce argument count
pub struct StatsOptions {
    pub input: PathBuf,
    pub job: Option<String>,
    pub parallel: bool,
    pub threads: Option<usize>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Execute stats command
pub async fn execute_stats(options: StatsOptions) -> Result<()> {
    let settings = match &options.config {
        Some(path) => StatsSettings::load(path)?,
        None => StatsSettings::default(),
    };

    // 空文字は全タイトルに一致する
    let job_name = options
        .job
        .clone()
        .or_else(|| settings.job_name.clone())
        .ok_or_else(|| VacancyError::configuration("не задано название профессии (--job)"))?;

    let started = Instant::now();
    let stats = aggregate(&options, &settings, &job_name).await?;

    if !options.quiet {
        println!("⏱️  Elapsed: {:.2}s", started.elapsed().as_secs_f64());
    }

    print_stats(&stats, options.json)
}

/// ディレクトリはパーティション集合、`--parallel` 付きのファイルは単一パーティションとして集計する
async fn aggregate(
    options: &StatsOptions,
    settings: &StatsSettings,
    job_name: &str,
) -> VacancyResult<AggregateStats> {
    let app = App::new(Arc::new(LocalStorageBackend::new()));
    let input = options.input.to_string_lossy().to_string();

    if !options.parallel && !options.input.is_dir() {
        return app.run(&input, job_name).await;
    }

    let mut config = settings.to_scheduler_config();
    if let Some(threads) = options.threads {
        config = config.with_max_workers(threads);
    }
    let reporter = Arc::new(if options.quiet {
        ConsoleProgressReporter::quiet()
    } else {
        ConsoleProgressReporter::new()
    });

    let (stats, summary) = if options.input.is_dir() {
        if !options.quiet {
            println!("📂 Partition directory: {input}");
        }
        app.run_parallel(&input, job_name, config, reporter).await?
    } else {
        app.run_partitions(vec![input], job_name, config, reporter)
            .await?
    };
    tracing::info!(
        partitions = summary.total_partitions,
        elapsed_ms = summary.elapsed_ms,
        "partitioned aggregation finished"
    );
    Ok(stats)
}

fn print_stats(stats: &AggregateStats, json: bool) -> Result<()> {
    for line in ReportProjector::summary_lines(stats) {
        println!("{line}");
    }

    let tables = ReportProjector::project(stats);
    if json {
        println!("{}", tables.to_json()?);
    } else {
        println!();
        print!("{}", render_tables(&tables));
    }
    Ok(())
}

/// 年別表と地域別表をタブ区切りで描画する
fn render_tables(tables: &ReportTables) -> String {
    let mut out = tables.year_headers.join("\t");
    out.push('\n');
    for row in &tables.year_rows {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            row.year, row.avg_salary_all, row.count_all, row.avg_salary_job, row.count_job
        ));
    }

    out.push('\n');
    out.push_str(&tables.region_headers.join("\t"));
    out.push('\n');
    let rows = tables.salary_by_region.len().max(tables.share_by_region.len());
    for i in 0..rows {
        let (city, salary) = tables
            .salary_by_region
            .get(i)
            .map(|(city, salary)| (city.as_str(), salary.to_string()))
            .unwrap_or(("", String::new()));
        let (share_city, share) = tables
            .share_by_region
            .get(i)
            .map(|(city, share)| (city.as_str(), format!("{share}%")))
            .unwrap_or(("", String::new()));
        out.push_str(&format!("{city}\t{salary}\t{share_city}\t{share}\n"));
    }
    out
}
