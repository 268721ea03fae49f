//! Check command - validate a payload against a schema file

use anyhow::{Context, Result};
use clap::Args;
use formguard::SchemaConfig;
use serde_json::{json, Value};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema configuration file (JSON)
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Payload to validate (JSON file, or `-` for stdin)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Pretty-print the result
    #[arg(long)]
    pub pretty: bool,

    /// Report failures in the API error envelope
    #[arg(long)]
    pub envelope: bool,
}

/// Validate the payload, print the result and report validity as the exit code
pub fn check(args: CheckArgs) -> Result<ExitCode> {
    let raw_schema = fs::read_to_string(&args.schema)
        .with_context(|| format!("Failed to read schema {}", args.schema.display()))?;
    let schema = SchemaConfig::from_json(&raw_schema)
        .and_then(|config| config.build())
        .with_context(|| format!("Invalid schema {}", args.schema.display()))?;

    let payload: Value = serde_json::from_str(&read_data(&args.data)?)
        .with_context(|| format!("Payload {} is not valid JSON", args.data.display()))?;

    tracing::debug!(fields = schema.len(), "validating payload");

    let (report, code) = match schema.parse_data(&payload) {
        Ok(data) => (json!({ "valid": true, "data": data }), ExitCode::SUCCESS),
        Err(errors) if args.envelope => (serde_json::to_value(errors.to_api_error())?, ExitCode::FAILURE),
        Err(errors) => (json!({ "valid": false, "errors": errors }), ExitCode::FAILURE),
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", rendered);

    Ok(code)
}

fn read_data(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read payload from stdin")?;
        return Ok(buffer);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read payload {}", path.display()))
}
