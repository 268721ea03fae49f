//! CLI commands

mod check;
mod mime;

pub use check::{check, CheckArgs};
pub use mime::{mime, MimeArgs};
