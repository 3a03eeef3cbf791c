//! Usage:
//!   fieldlog [--config PATH] [--name NAME] [--level LEVEL] [--format FORMAT] [--caller]
//!            <debug|info|warn|err|fatal> <MSG> [KEY=VALUE]...

use clap::Parser;
use fieldlog::cli::{Cli, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    run(Cli::parse())
}
