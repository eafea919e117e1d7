use log::{Level, LevelFilter};
use std::borrow::Cow;
use std::fmt;
use std::io::Write;
use thiserror::Error;

use crate::config::{ConfigError, LogConfig, LogFileConfig, LogTarget, TimestampPrecision};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to install logger: {0}")]
    Install(#[from] log::SetLoggerError),
}

/// Handle the pipeline logs through. The name becomes the `[<logger-name>]` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    name: Cow<'static, str>,
}

impl Logger {
    pub const DEFAULT_NAME: &'static str = "template_parser";

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        log::log!(target: self.name(), level, "{}", args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }
}

/// Installs the process-wide logger and returns the handle to pass around.
///
/// A log configuration file takes precedence over `--logLevel`; with neither,
/// only errors are shown.
pub fn init_logger(config: &LogConfig) -> Result<Logger, LoggingError> {
    let mut builder = build_logger(config)?;
    builder.try_init()?;
    Ok(Logger::default())
}

/// Builds the env_logger backend for `config` without installing it.
pub fn build_logger(config: &LogConfig) -> Result<env_logger::Builder, ConfigError> {
    let file_config = match &config.config_file {
        Some(path) => Some(LogFileConfig::load(path)?),
        None => None,
    };

    let mut builder = env_logger::Builder::new();
    match file_config {
        Some(file) => {
            let level = file.level.or(config.level).unwrap_or_default();
            builder.filter_level(level.to_level_filter());
            for directive in &file.filters {
                builder.parse_filters(directive);
            }
            builder.target(match file.target {
                LogTarget::Stderr => env_logger::Target::Stderr,
                LogTarget::Stdout => env_logger::Target::Stdout,
            });
            apply_format(&mut builder, file.timestamp);
        }
        None => {
            let level = config.level.unwrap_or_default();
            builder.filter_level(level.to_level_filter());
            apply_format(&mut builder, TimestampPrecision::default());
        }
    }
    Ok(builder)
}

fn apply_format(builder: &mut env_logger::Builder, precision: TimestampPrecision) {
    builder.format(move |buf, record| {
        let ts = match precision {
            TimestampPrecision::None => None,
            TimestampPrecision::Seconds => Some(buf.timestamp_seconds()),
            TimestampPrecision::Millis => Some(buf.timestamp_millis()),
            TimestampPrecision::Micros => Some(buf.timestamp_micros()),
            TimestampPrecision::Nanos => Some(buf.timestamp_nanos()),
        };
        match ts {
            Some(ts) => writeln!(
                buf,
                "{} [{}] [{}] : {}",
                ts,
                record.target(),
                level_name(record.level()),
                record.args()
            ),
            None => writeln!(
                buf,
                "[{}] [{}] : {}",
                record.target(),
                level_name(record.level()),
                record.args()
            ),
        }
    });
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

/// The most verbose level a built logger lets through.
pub fn effective_level(config: &LogConfig) -> Result<LevelFilter, ConfigError> {
    Ok(build_logger(config)?.build().filter())
}
