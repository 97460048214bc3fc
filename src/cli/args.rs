use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vacancy_stats")]
#[command(about = "Salary and vacancy-count statistics over job-vacancy CSV exports")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate yearly and regional statistics
    Stats {
        /// CSV file, or a directory of partition CSV files
        input: PathBuf,

        /// Profession name to match (substring of the vacancy title; "" matches every title)
        #[arg(short, long)]
        job: Option<String>,

        /// Aggregate through the partition worker pool (a file input is a single partition)
        #[arg(short, long)]
        parallel: bool,

        /// Number of partition workers
        #[arg(short, long)]
        threads: Option<usize>,

        /// JSON settings file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the projected tables as JSON
        #[arg(long)]
        json: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print vacancies from one CSV file as a table
    Table {
        /// CSV file with the full column set
        file: PathBuf,

        /// Filter in the form "Поле: значение"
        #[arg(short, long, default_value = "")]
        filter: String,

        /// Column heading to sort by
        #[arg(short, long, default_value = "")]
        sort: String,

        /// Descending sort: Да or Нет
        #[arg(short, long, default_value = "")]
        reverse: String,

        /// Output range "start [end]", 1-based with exclusive end
        #[arg(long, default_value = "")]
        range: String,

        /// Comma-separated column headings ("Название, Оклад")
        #[arg(long, default_value = "")]
        columns: String,
    },

    /// Split one CSV file into per-year partition files
    Split {
        /// Source CSV file
        source: PathBuf,

        /// Output directory for vacancies_by_<year>.csv files
        #[arg(default_value = "partitions")]
        out_dir: PathBuf,
    },
}
