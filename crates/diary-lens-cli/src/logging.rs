use diary_lens_core::config::LogConfig;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub fn init_logger(config: &LogConfig) -> impl Drop {
    let filter = env::var("TRACING_LEVEL").unwrap_or_else(|_| config.level.clone());
    let filter_layer = EnvFilter::new(filter);

    let (log_dir, log_file) = split_log_path(&config.file_path);
    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .pretty()
                .with_file(false)
                .without_time()
                .with_ansi(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(filter_layer)
        .init();

    debug!("Logging to stdout and {}", config.file_path.display());

    guard
}

/// Directory and file name for the appender. A bare file name logs to the
/// working directory.
fn split_log_path(path: &Path) -> (PathBuf, OsString) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("diary-lens.log"));
    (dir, file)
}
