//! Logging Infrastructure
//!
//! Structured logging setup for development and production environments.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize the logger.
///
/// `RUST_LOG` takes precedence over `default_level`. When `log_dir` points
/// at an existing directory, output goes to a daily-rolling file there
/// instead of stdout; the returned guard must stay alive for the lifetime
/// of the process or buffered lines are lost.
pub fn init_logger(default_level: &str, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(dir, "market-server");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            subscriber.with_writer(writer).with_ansi(false).init();
            return Some(guard);
        }
    }

    subscriber.init();
    None
}
