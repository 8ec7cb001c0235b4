//! File logging. The terminal belongs to the UI, so nothing goes to stdout.

use crate::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the background log writer alive; drop it last.
pub struct LogGuard {
    _guard: WorkerGuard,
}

pub fn init_tracing(config: &LoggingConfig) -> Option<LogGuard> {
    if !config.enabled {
        return None;
    }

    if let Err(err) = std::fs::create_dir_all(&config.dir) {
        eprintln!("failed to create log directory {}: {err}", config.dir.display());
        return None;
    }

    let env_filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.dir, "romaji-srs.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Some(LogGuard { _guard: guard })
}
