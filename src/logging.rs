//! Logging configuration using tracing, to a file or to stderr.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize tracing.
///
/// With `log_path`, events go to that file through a non-blocking writer and
/// the returned guard must be held for the duration of the program so logs
/// are flushed. Without it, events go to stderr and no guard is needed.
///
/// In debug builds, span enter/exit events are logged for detailed tracing.
pub fn init_logging(log_path: Option<&Path>, level: &str) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_new(format!("colorpro={level}"))
        .unwrap_or_else(|_| EnvFilter::new("colorpro=warn"));

    let Some(log_path) = log_path else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_target(false),
            )
            .init();
        return None;
    };

    let parent = log_path.parent().unwrap_or(Path::new("."));
    let filename = log_path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("colorpro.log"));

    let file_appender = tracing_appender::rolling::never(parent, filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false);

    // Only add span events in debug builds (significant overhead in release)
    #[cfg(debug_assertions)]
    let file_layer = {
        use tracing_subscriber::fmt::format::FmtSpan;
        file_layer.with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Some(guard)
}
