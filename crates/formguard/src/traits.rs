//! Core validator traits.

use crate::error::{RuleError, ValidationResult};
use serde_json::Value;

/// Per-call options for [`Validator::validate_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Overrides the subject name used in generated messages.
    pub field_name: Option<String>,
}

impl ValidateOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options naming the validated field.
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            field_name: Some(name.into()),
        }
    }

    /// The field name, or `default` when none was given.
    pub fn field_name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.field_name.as_deref().unwrap_or(default)
    }
}

/// A typed validator for a single value.
///
/// Every implementation follows the same protocol: a nullability gate, a
/// required check, a validator-specific type check (possibly coercing), then
/// the rule chain in insertion order.
///
/// ## Example
///
/// ```rust
/// use formguard::prelude::*;
/// use serde_json::json;
///
/// let age = formguard::integer().min(18);
///
/// assert_eq!(age.validate(&json!("42")).unwrap(), Some(42));
/// assert!(age.validate(&json!(15)).is_err());
/// ```
pub trait Validator: Send + Sync {
    /// The validated value produced on success.
    type Output: Into<Value>;

    /// Subject name used in messages when no field name is given.
    const DEFAULT_FIELD_NAME: &'static str;

    /// Validate a raw value with explicit options.
    ///
    /// Returns `Ok(None)` when the validator is nullable and the value is
    /// absent.
    fn validate_with(
        &self,
        value: &Value,
        options: &ValidateOptions,
    ) -> ValidationResult<Option<Self::Output>>;

    /// Validate a raw value using the default field name.
    fn validate(&self, value: &Value) -> ValidationResult<Option<Self::Output>> {
        self.validate_with(value, &ValidateOptions::default())
    }

    /// Short name of the validator kind, used in diagnostics.
    fn kind(&self) -> &'static str;

    /// Erase the output type so the validator can live in an object schema.
    fn boxed(self) -> Box<dyn FieldValidator>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

/// Type-erased validator used by [`ObjectSchema`](crate::ObjectSchema).
pub trait FieldValidator: Send + Sync {
    /// Validate a value under the given field name, producing JSON data.
    fn validate_field(&self, value: &Value, field_name: &str) -> ValidationResult<Value>;

    /// Short name of the validator kind.
    fn field_kind(&self) -> &'static str;
}

impl<V: Validator> FieldValidator for V {
    fn validate_field(&self, value: &Value, field_name: &str) -> ValidationResult<Value> {
        self.validate_with(value, &ValidateOptions::field(field_name))
            .map(|data| data.map_or(Value::Null, Into::into))
    }

    fn field_kind(&self) -> &'static str {
        self.kind()
    }
}

/// Shared steps 1 and 2 of the validation protocol for an absent value.
pub(crate) fn absent<T>(nullable: bool, field: &str) -> ValidationResult<Option<T>> {
    if nullable {
        Ok(None)
    } else {
        Err(RuleError::required(field).into())
    }
}

/// Log the outcome of a validate call.
pub(crate) fn traced<T>(
    kind: &'static str,
    field: &str,
    result: ValidationResult<Option<T>>,
) -> ValidationResult<Option<T>> {
    match &result {
        Ok(data) => tracing::debug!(validator = kind, field, null = data.is_none(), "validation passed"),
        Err(errors) => tracing::debug!(
            validator = kind,
            field,
            errors = errors.len(),
            "validation failed"
        ),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_name_defaults() {
        assert_eq!(ValidateOptions::new().field_name_or("value"), "value");
        assert_eq!(ValidateOptions::field("age").field_name_or("value"), "age");
    }

    #[test]
    fn absent_respects_nullable() {
        assert_eq!(absent::<i64>(true, "age").unwrap(), None);

        let errors = absent::<i64>(false, "age").unwrap_err();
        assert_eq!(errors.messages(), vec!["age is required"]);
    }
}
