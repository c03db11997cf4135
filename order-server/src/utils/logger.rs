//! Logging Infrastructure
//!
//! Structured logging with an env filter and an optional daily rolling file.

use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with optional JSON format and file output
///
/// `RUST_LOG` wins over `log_level` when set.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    let file_writer = log_dir.and_then(|dir| {
        let log_path = Path::new(dir);
        if let Err(e) = std::fs::create_dir_all(log_path) {
            eprintln!("Failed to create log directory {dir}: {e}");
            return None;
        }
        Some(tracing_appender::rolling::daily(log_path, "order-server"))
    });

    // try_init: tests may install a subscriber more than once
    let result = match (file_writer, json) {
        (Some(file), true) => builder
            .json()
            .with_writer(std::io::stdout.and(file))
            .try_init(),
        (Some(file), false) => builder
            .with_writer(std::io::stdout.and(file))
            .try_init(),
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };

    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
}
