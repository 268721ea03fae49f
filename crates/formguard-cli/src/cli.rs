//! CLI argument parsing

use crate::commands::{self, CheckArgs, MimeArgs};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// formguard - validate JSON payloads against declarative schemas
#[derive(Parser, Debug)]
#[command(name = "formguard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a JSON payload against a schema configuration
    Check(CheckArgs),

    /// Look up the MIME type of file extensions
    Mime(MimeArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Commands::Check(args) => commands::check(args),
            Commands::Mime(args) => commands::mime(args),
        }
    }
}
