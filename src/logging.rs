//! Diagnostic logging and tracing for kwlog
//!
//! This is the process log (session start, protocol anomalies, outcomes), not
//! the measurement data log. Output goes to the console and to a daily-rolling
//! file through the tracing ecosystem.

use crate::config::LoggingConfig;
use crate::error::{KwLogError, Result};
use std::path::Path;
use tracing::{Level, Subscriber, info};
use tracing_appender::non_blocking;
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod level;
mod state;
mod structured;

pub use level::parse_log_level;
pub use structured::{LogContext, StructuredLogger, get_logger, get_logger_with_context};

use level::min_level;
use state::{INIT_ERROR, INIT_ONCE, LOG_GUARD};

/// Install the global subscriber. Later calls return the first call's outcome.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    INIT_ONCE.call_once(|| {
        if let Err(e) = install_subscriber(config) {
            let _ = INIT_ERROR.set(e.to_string());
        }
    });

    match INIT_ERROR.get() {
        Some(err) => Err(KwLogError::config(err.clone())),
        None => Ok(()),
    }
}

fn install_subscriber(config: &LoggingConfig) -> Result<()> {
    let base = parse_log_level(&config.level)?;
    let console_level = override_level(config.console_level.as_deref(), base);
    let file_level = override_level(config.file_level.as_deref(), base);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("kwlog={}", min_level(console_level, file_level)).into()
    });

    let console_only = file_logging_disabled();
    let file_layer = if console_only {
        None
    } else {
        let (writer, guard) = non_blocking(file_appender(config)?);
        let _ = LOG_GUARD.set(guard);
        Some(output_layer(writer, config.json_format, file_level))
    };
    let console_layer = (console_only || config.console_output)
        .then(|| output_layer(std::io::stdout, config.json_format, console_level));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    // Test binaries may already carry a subscriber
    if let Err(e) = installed
        && !console_only
    {
        return Err(KwLogError::config(e.to_string()));
    }

    if console_only {
        info!("Logging initialized - console_level: {:?}, console-only", console_level);
    } else {
        info!(
            "Logging initialized - console_level: {:?}, file_level: {:?}, file: {}",
            console_level, file_level, config.file
        );
    }
    Ok(())
}

fn override_level(name: Option<&str>, base: Level) -> Level {
    name.and_then(|s| parse_log_level(s).ok()).unwrap_or(base)
}

fn file_logging_disabled() -> bool {
    cfg!(test) || std::env::var_os("KWLOG_DISABLE_FILE_LOG").is_some()
}

fn file_appender(config: &LoggingConfig) -> Result<RollingFileAppender> {
    // A file path means "use its directory"
    let path = Path::new(&config.file);
    let dir = if path.extension().is_some() {
        path.parent().unwrap_or(path)
    } else {
        path
    };

    rolling::Builder::new()
        .rotation(rolling::Rotation::DAILY)
        .filename_prefix("kwlog")
        .filename_suffix("log")
        .max_log_files(config.backup_count as usize)
        .build(dir)
        .map_err(|e| KwLogError::io(format!("Failed to create log file appender: {}", e)))
}

fn output_layer<S, W>(writer: W, json: bool, level: Level) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);
    let filter = LevelFilter::from_level(level);
    if json {
        layer.json().with_filter(filter).boxed()
    } else {
        layer.with_filter(filter).boxed()
    }
}
