use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(config: &LoggingConfig, debug: bool) -> String {
    let level = if debug { "debug" } else { config.level.as_str() };
    format!("{level},serenity=warn,tungstenite=warn")
}

/// Install console logging, plus a daily rolling file when
/// `config.directory` is set. Keep the returned guard alive until exit or
/// buffered file output is lost.
pub fn init_logging(config: &LoggingConfig, debug: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config, debug)));

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory).ok();
            let file_appender = tracing_appender::rolling::daily(directory, "scheduler.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            // Console output
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true),
        )
        .with(file_layer)
        .init();

    guard
}
