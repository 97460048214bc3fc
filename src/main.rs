use clap::Parser;
use vacancy_stats::cli::{
    execute_split, execute_stats, execute_table, Cli, Commands, StatsOptions, TableOptions,
};
use vacancy_stats::core::error::VacancyError;
use vacancy_stats::logging::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Stats {
            input,
            job,
            parallel,
            threads,
            config,
            json,
            quiet,
        } => {
            execute_stats(StatsOptions {
                input,
                job,
                parallel,
                threads,
                config,
                json,
                quiet,
            })
            .await
        }
        Commands::Table {
            file,
            filter,
            sort,
            reverse,
            range,
            columns,
        } => {
            execute_table(TableOptions {
                file,
                filter,
                sort,
                reverse,
                range,
                columns,
            })
            .await
        }
        Commands::Split { source, out_dir } => execute_split(source, out_dir).await,
    };

    if let Err(error) = result {
        match error.downcast_ref::<VacancyError>() {
            // 空入力・該当なしはメッセージだけ出して正常終了
            Some(notice) if notice.is_terminal_notice() => println!("{notice}"),
            Some(failure) => {
                let context = failure.context();
                eprintln!("❌ {failure}");
                if let Some(suggestion) = context.suggestion {
                    eprintln!("💡 {suggestion}");
                }
                std::process::exit(1);
            }
            None => {
                eprintln!("❌ エラー: {error:#}");
                std::process::exit(1);
            }
        }
    }
}
