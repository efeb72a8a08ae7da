use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the process-wide tracing subscriber: leveled, timestamped lines
/// on stdout plus a non-blocking copy in `<log_dir>/server.log`.
///
/// Returns the appender guard; dropping it stops the background writer, so
/// `main` must hold it for the lifetime of the process. If the log
/// directory cannot be created the file sink is skipped and logging
/// continues on stdout alone.
pub fn init_tracing(service_name: &str, log_level: &str, log_dir: &str) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    match std::fs::create_dir_all(log_dir) {
        Ok(()) => {
            let file_appender = tracing_appender::rolling::never(log_dir, "server.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(file_writer)
                        .with_ansi(false),
                )
                .init();

            tracing::info!(
                service = service_name,
                "Logging to stdout and {}/server.log",
                log_dir
            );
            Some(guard)
        }
        Err(e) => {
            registry.init();

            tracing::warn!(
                service = service_name,
                error = %e,
                "Failed to create log directory {}, logging to stdout only",
                log_dir
            );
            None
        }
    }
}
