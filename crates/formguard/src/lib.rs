//! # formguard
//!
//! Composable validators for form and API payloads.
//!
//! Typed validators (string, integer, boolean, email, password, file) are
//! configured with chained rules and combined into object schemas. Every
//! validation is synchronous and pure; failures are returned as data, never
//! raised.
//!
//! ## Example
//!
//! ```rust
//! use formguard::prelude::*;
//! use serde_json::json;
//!
//! let password = formguard::password().min(8).contains_special_char();
//! let errors = password.validate(&json!("abcdefg")).unwrap_err();
//! assert_eq!(
//!     errors.messages(),
//!     vec![
//!         "Password must be at least 8 characters long.",
//!         "Password must contain at least one special character.",
//!     ]
//! );
//!
//! let schema = ObjectSchema::builder()
//!     .field("age", formguard::integer().min(18))
//!     .field("password", formguard::password().min(8))
//!     .build();
//!
//! let errors = schema
//!     .parse_data(&json!({
//!         "age": 15,
//!         "password": "longenough",
//!         "password_confirmation": "different"
//!     }))
//!     .unwrap_err();
//! assert_eq!(errors.get("age"), Some("age must be at least 18."));
//! assert_eq!(errors.get("password_confirmation"), Some("Passwords do not match"));
//! ```
//!
//! ## Validation order
//!
//! 1. Absent input (`null`, empty string or empty sequence, per validator)
//!    passes as `None` when `nullable()` was set.
//! 2. Otherwise absent input fails with `"<field> is required"`.
//! 3. The type check runs, coercing numeric and boolean strings.
//! 4. Every rule runs in insertion order and every failure is reported.
//!
//! [`ObjectSchema::parse_data`] keeps only the first error of each field.

mod coerce;
pub mod config;
mod error;
mod factory;
pub mod mime;
mod rule;
mod schema;
mod traits;
mod validators;

#[cfg(test)]
mod tests;

pub use coerce::OneOrMany;
pub use config::{FieldConfig, SchemaConfig};
pub use error::{
    ApiValidationError, ConfigError, ErrorBody, FieldErrorResponse, RuleError, SchemaErrors,
    ValidationErrors, ValidationResult,
};
pub use factory::{boolean, email, file, integer, object, password, string};
pub use rule::{Rule, RuleOutcome, RuleSet};
pub use schema::{ObjectSchema, ObjectSchemaBuilder, SchemaData};
pub use traits::{FieldValidator, ValidateOptions, Validator};
pub use validators::{
    BooleanValidator, EmailValidator, FileDescriptor, FileValidator, IntegerValidator,
    PasswordValidator, StringValidator, SPECIAL_CHARS,
};

/// Prelude module for validation
pub mod prelude {
    pub use crate::coerce::OneOrMany;
    pub use crate::error::{ConfigError, RuleError, SchemaErrors, ValidationErrors};
    pub use crate::schema::ObjectSchema;
    pub use crate::traits::{FieldValidator, ValidateOptions, Validator};
    pub use crate::validators::FileDescriptor;
}
