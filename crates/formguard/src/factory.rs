//! One constructor per validator kind.

use crate::schema::ObjectSchema;
use crate::traits::FieldValidator;
use crate::validators::{
    BooleanValidator, EmailValidator, FileValidator, IntegerValidator, PasswordValidator,
    StringValidator,
};

/// A new string validator.
pub fn string() -> StringValidator {
    StringValidator::new()
}

/// A new integer validator.
pub fn integer() -> IntegerValidator {
    IntegerValidator::new()
}

/// A new boolean validator.
pub fn boolean() -> BooleanValidator {
    BooleanValidator::new()
}

/// A new email validator with the built-in format rule.
pub fn email() -> EmailValidator {
    EmailValidator::new()
}

/// A new password validator.
pub fn password() -> PasswordValidator {
    PasswordValidator::new()
}

/// A new file validator.
pub fn file() -> FileValidator {
    FileValidator::new()
}

/// A schema over the given field mapping.
///
/// ```rust
/// use formguard::prelude::*;
/// use serde_json::json;
///
/// let schema = formguard::object([
///     ("name", formguard::string().min(2).boxed()),
///     ("age", formguard::integer().positive().boxed()),
/// ]);
/// assert!(schema.parse_data(&json!({ "name": "Ada", "age": 36 })).is_ok());
/// ```
pub fn object<I, K>(fields: I) -> ObjectSchema
where
    I: IntoIterator<Item = (K, Box<dyn FieldValidator>)>,
    K: Into<String>,
{
    ObjectSchema::new(fields)
}
