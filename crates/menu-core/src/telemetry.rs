//! Telemetry setup
//!
//! Logs go to a daily-rolling file only: the terminal belongs to the UI.

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingSettings};
use crate::error::{MenuError, Result};

pub fn init_logger(settings: &LoggingSettings) -> Result<()> {
    // RUST_LOG wins over the configured level
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| settings.level.clone());

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("menu")
        .filename_suffix("log")
        .build(&settings.directory)
        .map_err(|e| MenuError::Logging(e.to_string()))?;

    let filter = EnvFilter::try_new(&log_level).map_err(|e| MenuError::Logging(e.to_string()))?;

    let result = match settings.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(file_appender)
                    .with_target(true)
                    .with_level(true),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(false),
            )
            .try_init(),
    };

    result.map_err(|e| MenuError::Logging(e.to_string()))
}
