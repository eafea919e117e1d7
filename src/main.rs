use anyhow::{Context, Result};
use clap::{Args, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use template_parser::{init_logger, LogConfig, LogLevel, RenderOptions, TemplateParser};

/// Single-dash long flags accepted for compatibility, with their `--` spelling.
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-df", "--dataFile"),
    ("-tf", "--templateFile"),
    ("-of", "--outputFile"),
    ("-lcf", "--logConfigFile"),
    ("-ll", "--logLevel"),
    ("-su", "--strictUndefined"),
];

#[derive(Parser, Debug)]
#[command(author, version, about = "Populate a .docx template with data from a YAML or JSON file", long_about = None)]
struct Cli {
    #[command(flatten)]
    required: RequiredArgs,

    #[command(flatten)]
    logging: LoggingArgs,

    /// Treat undefined template variables as errors instead of empty text
    #[arg(long = "strictUndefined")]
    strict_undefined: bool,
}

#[derive(Args, Debug)]
#[command(next_help_heading = "Required Args [ Mandatory ]")]
struct RequiredArgs {
    /// Input Data File (.yaml, .yml, .json)
    #[arg(long = "dataFile", value_name = "PATH")]
    data_file: PathBuf,

    /// Input Template File (.docx)
    #[arg(long = "templateFile", value_name = "PATH")]
    template_file: PathBuf,

    /// Rendered Output File (.docx)
    #[arg(long = "outputFile", value_name = "PATH")]
    output_file: PathBuf,
}

#[derive(Args, Debug)]
#[command(next_help_heading = "Logging Args [ Optional ]")]
struct LoggingArgs {
    /// Logger Configuration File (YAML); takes precedence over --logLevel
    #[arg(long = "logConfigFile", value_name = "PATH")]
    log_config_file: Option<PathBuf>,

    /// Logger Level [ CRITICAL, ERROR, WARNING, INFO, DEBUG, NOTSET ]
    #[arg(long = "logLevel", value_name = "LEVEL")]
    log_level: Option<LogLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let logger = init_logger(&LogConfig {
        level: cli.logging.log_level,
        config_file: cli.logging.log_config_file.clone(),
    })
    .context("Failed to initialize logging")?;

    let parser = TemplateParser::new(logger).with_options(RenderOptions {
        strict_undefined: cli.strict_undefined,
        ..RenderOptions::default()
    });
    parser.parse(
        &cli.required.data_file,
        &cli.required.template_file,
        &cli.required.output_file,
    )?;

    Ok(())
}

/// Rewrites `-df x` / `-df=x` style flags into the long form clap understands.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| arg.to_str().and_then(rewrite_legacy_flag).unwrap_or(arg))
        .collect()
}

fn rewrite_legacy_flag(arg: &str) -> Option<OsString> {
    LEGACY_FLAGS.iter().find_map(|(short, long)| {
        if arg == *short {
            return Some(OsString::from(*long));
        }
        arg.strip_prefix(short)
            .and_then(|rest| rest.strip_prefix('='))
            .map(|value| OsString::from(format!("{}={}", long, value)))
    })
}
