//! Integer validator with numeric-string coercion.

use crate::coerce;
use crate::error::{RuleError, ValidationResult};
use crate::rule::{Rule, RuleOutcome, RuleSet};
use crate::traits::{absent, traced, ValidateOptions, Validator};
use serde_json::Value;

/// Validates whole numbers, coercing numeric strings first.
///
/// Values must fit in an `i64`; larger whole numbers fail with a `range`
/// error rather than the type error.
#[derive(Debug, Default)]
pub struct IntegerValidator {
    rules: RuleSet<i64>,
    nullable: bool,
}

impl IntegerValidator {
    /// Create an integer validator with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `null` and blank strings as a valid `null`.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Require a value of at least `min_value`.
    pub fn min(mut self, min_value: i64) -> Self {
        self.rules.push(
            Rule::check(
                "min",
                move |value: &i64| *value >= min_value,
                move |field| format!("{field} must be at least {min_value}."),
            )
            .param("min", min_value),
        );
        self
    }

    /// Require a value of at most `max_value`.
    pub fn max(mut self, max_value: i64) -> Self {
        self.rules.push(
            Rule::check(
                "max",
                move |value: &i64| *value <= max_value,
                move |field| format!("{field} must be at most {max_value}."),
            )
            .param("max", max_value),
        );
        self
    }

    /// Require a value greater than zero.
    pub fn positive(mut self) -> Self {
        self.rules.push(Rule::check(
            "positive",
            |value: &i64| *value > 0,
            |field| format!("{field} must be a positive number."),
        ));
        self
    }

    /// Add a custom rule, run in insertion order with the built-in ones.
    pub fn rule<F>(mut self, code: impl Into<String>, check: F) -> Self
    where
        F: Fn(&i64, &str) -> RuleOutcome<i64> + Send + Sync + 'static,
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

impl Validator for IntegerValidator {
    type Output = i64;

    const DEFAULT_FIELD_NAME: &'static str = "value";

    fn validate_with(
        &self,
        value: &Value,
        options: &ValidateOptions,
    ) -> ValidationResult<Option<i64>> {
        let field = options.field_name_or(Self::DEFAULT_FIELD_NAME);

        let result = if coerce::is_blank(value) {
            absent(self.nullable, field)
        } else {
            match coerce::to_integer(value) {
                Some(number) => self.rules.run(number, field).map(Some),
                None if coerce::is_whole_number(value) => Err(RuleError::new(
                    "range",
                    format!("{field} must be between {} and {}.", i64::MIN, i64::MAX),
                )
                .param("min", i64::MIN)
                .param("max", i64::MAX)
                .into()),
                None => Err(RuleError::new("type", format!("{field} must be an integer")).into()),
            }
        };

        traced(self.kind(), field, result)
    }

    fn kind(&self) -> &'static str {
        "integer"
    }
}
