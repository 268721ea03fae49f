//! Primitive validators.
//!
//! Each validator is configured through consuming builder calls and then
//! used for any number of independent [`Validator::validate`](crate::Validator::validate)
//! calls.

mod boolean;
mod email;
mod file;
mod integer;
mod password;
mod string;

pub use boolean::BooleanValidator;
pub use email::EmailValidator;
pub use file::{FileDescriptor, FileValidator};
pub use integer::IntegerValidator;
pub use password::{PasswordValidator, SPECIAL_CHARS};
pub use string::StringValidator;

/// Warn when `with_message` had no rule to attach to.
pub(crate) fn unattached_message(kind: &'static str) {
    tracing::warn!(validator = kind, "with_message called before any rule was added; ignored");
}
