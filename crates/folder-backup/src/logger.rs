use std::io;

use thiserror::Error;
use tracing::{Level, subscriber::set_global_default};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, registry};

/// Create and set the global logger.
///
/// Logs are only written to stdout so a backup run leaves no files behind other
/// than the archive. The returned guard must be held until the program exits.
pub fn init_logger(level: Level) -> Result<WorkerGuard, LoggerError> {
    let filter = tracing_subscriber::filter::Targets::new().with_default(level);

    // Std layer
    let (std_guard, std_layer) = {
        let (writer, guard) = tracing_appender::non_blocking(io::stdout());

        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(true)
            .with_target(false);

        (guard, layer)
    };

    // Create registry
    let registry = registry().with(std_layer).with(filter);

    // Set global subscriber
    set_global_default(registry)?;

    Ok(std_guard)
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to set the global subscriber:\n{0}")]
    SetGlobalDefault(#[from] tracing::subscriber::SetGlobalDefaultError),
}
