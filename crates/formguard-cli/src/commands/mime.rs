//! Mime command - extension lookup in the supported table

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use formguard::mime::{mime_type_for_extension, SUPPORTED_EXTENSIONS};
use std::process::ExitCode;

#[derive(Args, Debug)]
pub struct MimeArgs {
    /// Extensions to look up, e.g. `png` or `.PDF`
    #[arg(required_unless_present = "list")]
    pub extensions: Vec<String>,

    /// Print every supported extension
    #[arg(short, long)]
    pub list: bool,
}

pub fn mime(args: MimeArgs) -> Result<ExitCode> {
    let extensions: Vec<&str> = if args.list {
        SUPPORTED_EXTENSIONS.to_vec()
    } else {
        args.extensions.iter().map(String::as_str).collect()
    };

    let mut unknown = Vec::new();
    for extension in extensions {
        match mime_type_for_extension(extension) {
            Some(mime) => println!("{:<6} {}", style(extension).cyan(), mime),
            None => unknown.push(extension),
        }
    }

    if !unknown.is_empty() {
        bail!(
            "unsupported extension(s): {} (supported: {})",
            unknown.join(", "),
            SUPPORTED_EXTENSIONS.join(", ")
        );
    }

    Ok(ExitCode::SUCCESS)
}
