//! Boolean validator with string coercion.

use crate::coerce;
use crate::error::{RuleError, ValidationResult};
use crate::rule::{Rule, RuleOutcome, RuleSet};
use crate::traits::{absent, traced, ValidateOptions, Validator};
use serde_json::Value;

/// Validates booleans, coercing `"true"`/`"1"` and `"false"`/`"0"`.
#[derive(Debug, Default)]
pub struct BooleanValidator {
    rules: RuleSet<bool>,
    nullable: bool,
}

impl BooleanValidator {
    /// Create a boolean validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `null` and blank strings as a valid `null`.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Add a custom rule, e.g. requiring an accepted checkbox.
    pub fn rule<F>(mut self, code: impl Into<String>, check: F) -> Self
    where
        F: Fn(&bool, &str) -> RuleOutcome<bool> + Send + Sync + 'static,
    {
        self.rules.push(Rule::new(code, check));
        self
    }

    /// Replace the message of the most recently added rule.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        if !self.rules.set_last_message(message.into()) {
            super::unattached_message(self.kind());
        }
        self
    }
}

impl Validator for BooleanValidator {
    type Output = bool;

    const DEFAULT_FIELD_NAME: &'static str = "value";

    fn validate_with(
        &self,
        value: &Value,
        options: &ValidateOptions,
    ) -> ValidationResult<Option<bool>> {
        let field = options.field_name_or(Self::DEFAULT_FIELD_NAME);

        let result = if coerce::is_blank(value) {
            absent(self.nullable, field)
        } else {
            match coerce::to_bool(value) {
                Some(flag) => self.rules.run(flag, field).map(Some),
                None => Err(RuleError::new("type", format!("{field} must be a boolean")).into()),
            }
        };

        traced(self.kind(), field, result)
    }

    fn kind(&self) -> &'static str {
        "boolean"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_strings() {
        let validator = BooleanValidator::new();
        assert_eq!(validator.validate(&json!("true")).unwrap(), Some(true));
        assert_eq!(validator.validate(&json!("0")).unwrap(), Some(false));
        assert_eq!(validator.validate(&json!(false)).unwrap(), Some(false));
    }

    #[test]
    fn rejects_other_strings() {
        let errors = BooleanValidator::new().validate(&json!("yes")).unwrap_err();
        assert_eq!(errors.messages(), vec!["value must be a boolean"]);
    }

    #[test]
    fn false_is_not_absent() {
        let validator = BooleanValidator::new().nullable();
        assert_eq!(validator.validate(&json!(false)).unwrap(), Some(false));
        assert_eq!(validator.validate(&Value::Null).unwrap(), None);
    }

    #[test]
    fn custom_rule() {
        let validator = BooleanValidator::new().rule("accepted", |value, field| {
            if *value {
                Ok(None)
            } else {
                Err(RuleError::new("accepted", format!("{field} must be accepted")))
            }
        });
        let errors = validator
            .validate_with(&json!("false"), &ValidateOptions::field("terms"))
            .unwrap_err();
        assert_eq!(errors.messages(), vec!["terms must be accepted"]);
    }
}
