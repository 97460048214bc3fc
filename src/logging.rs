// ログ初期化 - tracing_subscriber による構造化ログ
// 進捗表示(println)とは別に、診断情報は stderr に出す

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// `-v` の回数をログレベルに変換する
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// ログを初期化する
///
/// `RUST_LOG` が設定されていればそれを優先する。二重初期化は無視する。
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(verbose)));

    let initialized = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_thread_ids(verbose >= 3)
        .with_line_number(verbose >= 3)
        .try_init()
        .is_ok();

    if initialized {
        debug!(verbose, "logging initialized");
    }
}
