//! Command-line front end: writes one record to standard output so shell scripts can
//! log in the same format as the services around them.

use crate::config::Config;
use crate::field::Field;
use crate::level::Level;
use crate::logger::{Logger, LoggerBuilder};
use crate::output::Format;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

/// Severity of the record being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Err,
    Fatal,
}

impl From<Severity> for Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Debug => Self::Debug,
            Severity::Info => Self::Info,
            Severity::Warn => Self::Warn,
            Severity::Err => Self::Err,
            Severity::Fatal => Self::Fatal,
        }
    }
}

/// fieldlog - write a structured log record from the command line.
#[derive(Debug, Parser)]
#[command(
    name = "fieldlog",
    version,
    about = "Write a structured log record from the command line"
)]
pub struct Cli {
    /// Config file; the platform default location when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Logger name written as `src`
    #[arg(long)]
    pub name: Option<String>,

    /// Threshold (any prefix of all, fatal, err, warn, info, debug)
    #[arg(long)]
    pub level: Option<String>,

    /// Record encoding (logfmt or json)
    #[arg(long)]
    pub format: Option<String>,

    /// Include the `caller` field
    #[arg(long)]
    pub caller: bool,

    /// Severity of the record
    #[arg(value_enum)]
    pub severity: Severity,

    /// Message text
    pub msg: String,

    /// Extra fields as KEY=VALUE
    #[arg(value_parser = parse_field)]
    pub fields: Vec<Field>,
}

/// Parses `KEY=VALUE`. The value may itself contain `=`; the key may not be empty.
///
/// # Errors
/// Returns a message when the argument has no `=` or an empty key.
pub fn parse_field(arg: &str) -> Result<Field, String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok(Field::new(key, value)),
        _ => Err(format!("expected KEY=VALUE, got '{arg}'")),
    }
}

/// Applies command-line overrides on top of the config-derived builder.
///
/// # Errors
/// Config loading or destination errors.
pub fn build_logger(cli: &Cli) -> Result<Logger, crate::Error> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // The binary's own call site carries no information for the user.
    let mut builder = LoggerBuilder::from_config(&config)?.caller(cli.caller);

    if let Some(name) = &cli.name {
        builder = builder.name(name.clone());
    } else if config.logger.name.is_none() {
        builder = builder.name("fieldlog");
    }
    if let Some(level) = &cli.level {
        builder = builder.level(Level::parse(level));
    }
    if let Some(format) = &cli.format {
        builder = builder.format(Format::parse(format));
    }

    Ok(builder.build())
}

/// Writes the record. `fatal` exits with status 1 from inside the logger.
#[must_use]
pub fn run(cli: Cli) -> ExitCode {
    let logger = match build_logger(&cli) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("fieldlog: {e}");
            return ExitCode::FAILURE;
        }
    };

    let fields = cli.fields;
    match cli.severity {
        Severity::Fatal => logger.fatal(cli.msg, fields),
        severity => logger.log(severity.into(), cli.msg, fields),
    }

    match logger.flush() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fieldlog: {e}");
            ExitCode::FAILURE
        }
    }
}
