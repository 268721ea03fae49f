//! Password strength validator.

use crate::coerce;
use crate::error::{RuleError, ValidationResult};
use crate::rule::{Rule, RuleOutcome, RuleSet};
use crate::traits::{absent, traced, ValidateOptions, Validator};
use serde_json::Value;

/// Characters accepted by [`PasswordValidator::contains_special_char`].
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Validates passwords. Every rule is opt-in; the value is never trimmed.
#[derive(Debug, Default)]
pub struct PasswordValidator {
    rules: RuleSet<String>,
    nullable: bool,
}

impl PasswordValidator {
    /// Create a password validator with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `null` and the empty string as a valid `null`.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Require at least `length` characters.
    pub fn min(mut self, length: usize) -> Self {
        self.rules.push(
            Rule::check(
                "min",
                move |value: &String| value.chars().count() >= length,
                move |field| format!("{field} must be at least {length} characters long."),
            )
            .param("min", length),
        );
        self
    }

    /// Require at least one ASCII digit.
    pub fn contains_number(mut self) -> Self {
        self.rules.push(Rule::check(
            "contains_number",
            |value: &String| value.chars().any(|c| c.is_ascii_digit()),
            |field| format!("{field} must contain at least one number."),
        ));
        self
    }

    /// Require at least one character from [`SPECIAL_CHARS`].
    pub fn contains_special_char(mut self) -> Self {
        self.rules.push(Rule::check(
            "contains_special_char",
            |value: &String| value.chars().any(|c| SPECIAL_CHARS.contains(c)),
            |field| format!("{field} must contain at least one special character."),
        ));
        self
    }

    /// Require at least one ASCII uppercase letter.
    pub fn contains_uppercase(mut self) -> Self {
        self.rules.push(Rule::check(
            "contains_uppercase",
            |value: &String| value.chars().any(|c| c.is_ascii_uppercase()),
            |field| format!("{field} must contain at least one uppercase letter."),
        ));
        self
    }

    /// Add a custom rule, run in insertion order with the built-in ones.
    pub fn rule<F>(mut self, code: impl Into<String>, check: F) -> Self
    where
        F: Fn(&String, &str) -> RuleOutcome<String> + Send + Sync + 'static,
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

impl Validator for PasswordValidator {
    type Output = String;

    const DEFAULT_FIELD_NAME: &'static str = "Password";

    fn validate_with(
        &self,
        value: &Value,
        options: &ValidateOptions,
    ) -> ValidationResult<Option<String>> {
        let field = options.field_name_or(Self::DEFAULT_FIELD_NAME);

        let result = if coerce::is_null_or_empty(value) {
            absent(self.nullable, field)
        } else {
            match value {
                Value::String(secret) => self.rules.run(secret.clone(), field).map(Some),
                _ => Err(RuleError::new("type", format!("{field} must be a string")).into()),
            }
        };

        traced(self.kind(), field, result)
    }

    fn kind(&self) -> &'static str {
        "password"
    }
}
