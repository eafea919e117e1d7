use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// How the template engine treats the data it substitutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Undefined variables are errors instead of empty text.
    pub strict_undefined: bool,
    /// XML-escape substituted values.
    pub autoescape: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            strict_undefined: false,
            autoescape: true,
        }
    }
}

/// Severity names accepted on the command line and in the log configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum LogLevel {
    Critical,
    #[default]
    Error,
    Warning,
    Info,
    Debug,
    Trace,
    NotSet,
}

impl LogLevel {
    pub const NAMES: &'static [&'static str] =
        &["CRITICAL", "ERROR", "WARNING", "INFO", "DEBUG", "NOTSET"];

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Critical | LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace | LogLevel::NotSet => log::LevelFilter::Trace,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Critical => "CRITICAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
            LogLevel::NotSet => "NOTSET",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown level: '{0}'")]
pub struct UnknownLevel(String);

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CRITICAL" | "FATAL" => Ok(LogLevel::Critical),
            "ERROR" => Ok(LogLevel::Error),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            "NOTSET" => Ok(LogLevel::NotSet),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = UnknownLevel;

    fn try_from(value: String) -> Result<Self, UnknownLevel> {
        value.parse()
    }
}

/// Logger settings gathered from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Option<LogLevel>,
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    #[default]
    Stderr,
    Stdout,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPrecision {
    None,
    Seconds,
    #[default]
    Millis,
    Micros,
    Nanos,
}

/// Contents of the file passed with `--logConfigFile`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LogFileConfig {
    #[serde(default)]
    pub level: Option<LogLevel>,
    /// env_logger directives such as `zip=warn`.
    #[serde(default)]
    pub filters: Vec<String>,
    #[serde(default)]
    pub target: LogTarget,
    #[serde(default)]
    pub timestamp: TimestampPrecision,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read log config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse log config file {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl LogFileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}
