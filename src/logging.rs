use crate::config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber.
///
/// Console output goes to stderr so it never mixes with anything a caller
/// pipes from stdout. The returned guard must be held until exit when file
/// logging is enabled, otherwise buffered lines are lost.
pub fn init_logging(config: &LogConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(true);

    let registry = tracing_subscriber::registry().with(filter).with(console_layer);

    let Some(log_dir) = config.log_dir.as_deref() else {
        registry.init();
        return None;
    };

    let file_appender = match config.rotation.as_str() {
        "hourly" => tracing_appender::rolling::hourly(log_dir, &config.log_file),
        "daily" => tracing_appender::rolling::daily(log_dir, &config.log_file),
        _ => tracing_appender::rolling::never(log_dir, &config.log_file),
    };
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    if config.use_json {
        let file_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(non_blocking)
            .with_ansi(false);
        registry.with(file_layer).init();
    } else {
        let file_layer = fmt::layer()
            .with_target(false)
            .with_writer(non_blocking)
            .with_ansi(false);
        registry.with(file_layer).init();
    }

    Some(guard)
}
