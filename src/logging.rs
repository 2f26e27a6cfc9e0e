use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

/// Initialize the logging system
///
/// Logs go to stderr in compact form. When `settings.file` is set, a
/// daily-rotated JSON log is written next to it as well. `RUST_LOG`
/// overrides the level derived from `settings.verbose`.
pub fn init(settings: &LoggingSettings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(settings.verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    if let Some(log_path) = settings.file.as_deref() {
        let directory = log_directory(log_path);
        let _ = std::fs::create_dir_all(directory);

        let file_appender = tracing_appender::rolling::daily(
            directory,
            log_path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("notes-api.log")),
        );

        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .json();

        subscriber.with(file_layer).init();
    } else {
        subscriber.init();
    }
}

fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("notes_api={}", level)
}

fn log_directory(log_path: &Path) -> &Path {
    match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
