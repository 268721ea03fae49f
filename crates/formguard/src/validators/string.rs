//! String validator: trimmed text, singly or as an array.

use crate::coerce::{self, OneOrMany};
use crate::error::{RuleError, ValidationErrors, ValidationResult};
use crate::rule::{Rule, RuleOutcome, RuleSet};
use crate::traits::{absent, traced, ValidateOptions, Validator};
use serde_json::Value;

/// Validates strings, or sequences of strings in array mode.
///
/// Values are trimmed before rules run, and the trimmed value is returned.
///
/// ```rust
/// use formguard::prelude::*;
/// use serde_json::json;
///
/// let name = formguard::string().min(3);
/// assert!(name.validate(&json!("  ab  ")).is_err());
/// assert_eq!(
///     name.validate(&json!("  abcd  ")).unwrap(),
///     Some(OneOrMany::One("abcd".to_string()))
/// );
/// ```
#[derive(Debug, Default)]
pub struct StringValidator {
    rules: RuleSet<String>,
    nullable: bool,
    array: bool,
}

impl StringValidator {
    /// Create a string validator with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `null`, blank strings (and empty sequences in array mode) as
    /// a valid `null`.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Expect a sequence of strings instead of a single string.
    pub fn array(mut self) -> Self {
        self.array = true;
        self
    }

    /// Require a trimmed length of at least `length` characters.
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

    /// Require a trimmed length of at most `length` characters.
    pub fn max(mut self, length: usize) -> Self {
        self.rules.push(
            Rule::check(
                "max",
                move |value: &String| value.chars().count() <= length,
                move |field| format!("{field} must be at most {length} characters long."),
            )
            .param("max", length),
        );
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

    fn validate_one(&self, value: &Value, field: &str) -> ValidationResult<String> {
        match value {
            Value::String(s) => self.rules.run(s.trim().to_string(), field),
            other => {
                tracing::trace!(field, found = coerce::type_name(other), "expected string");
                Err(RuleError::new("type", format!("{field} must be a string")).into())
            }
        }
    }

    fn validate_many(&self, value: &Value, field: &str) -> ValidationResult<Vec<String>> {
        let Value::Array(items) = value else {
            return Err(RuleError::new("type", format!("{field} must be an array")).into());
        };

        let mut type_errors = Vec::new();
        let mut texts = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => texts.push(s.trim().to_string()),
                _ => type_errors.push(
                    RuleError::new("type", format!("{field}[{index}] must be a string"))
                        .param("index", index),
                ),
            }
        }
        if let Some(errors) = ValidationErrors::from_vec(type_errors) {
            return Err(errors);
        }

        let mut output = Vec::with_capacity(texts.len());
        let mut failures: Option<ValidationErrors> = None;
        for (index, text) in texts.into_iter().enumerate() {
            match self.rules.run(text, &format!("{field}[{index}]")) {
                Ok(text) => output.push(text),
                Err(errors) => match failures.as_mut() {
                    Some(all) => all.extend(errors),
                    None => failures = Some(errors),
                },
            }
        }

        match failures {
            None => Ok(output),
            Some(errors) => Err(errors),
        }
    }
}

impl Validator for StringValidator {
    type Output = OneOrMany<String>;

    const DEFAULT_FIELD_NAME: &'static str = "value";

    fn validate_with(
        &self,
        value: &Value,
        options: &ValidateOptions,
    ) -> ValidationResult<Option<Self::Output>> {
        let field = options.field_name_or(Self::DEFAULT_FIELD_NAME);

        let result = if self.array {
            if coerce::is_null_or_empty_seq(value) {
                absent(self.nullable, field)
            } else {
                self.validate_many(value, field)
                    .map(|texts| Some(OneOrMany::Many(texts)))
            }
        } else if coerce::is_blank(value) {
            absent(self.nullable, field)
        } else {
            self.validate_one(value, field)
                .map(|text| Some(OneOrMany::One(text)))
        };

        traced(self.kind(), field, result)
    }

    fn kind(&self) -> &'static str {
        "string"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn one(s: &str) -> Option<OneOrMany<String>> {
        Some(OneOrMany::One(s.to_string()))
    }

    #[test]
    fn trims_before_rules() {
        let validator = StringValidator::new().min(3);

        let errors = validator.validate(&json!("  ab  ")).unwrap_err();
        assert_eq!(errors.messages(), vec!["value must be at least 3 characters long."]);

        assert_eq!(validator.validate(&json!("  abcd  ")).unwrap(), one("abcd"));
    }

    #[test]
    fn required_and_nullable() {
        let required = StringValidator::new().min(3);
        let errors = required.validate(&Value::Null).unwrap_err();
        assert_eq!(errors.messages(), vec!["value is required"]);
        assert_eq!(errors.len(), 1);

        let optional = StringValidator::new().min(3).nullable();
        assert_eq!(optional.validate(&Value::Null).unwrap(), None);
        assert_eq!(optional.validate(&json!("   ")).unwrap(), None);
    }

    #[test]
    fn min_and_max_both_reported() {
        let validator = StringValidator::new().min(5).max(2);
        let errors = validator.validate(&json!("abc")).unwrap_err();
        assert_eq!(errors.codes(), vec!["min", "max"]);
    }

    #[test]
    fn rejects_non_strings() {
        let validator = StringValidator::new().min(100);
        let errors = validator
            .validate_with(&json!(42), &ValidateOptions::field("title"))
            .unwrap_err();
        assert_eq!(errors.messages(), vec!["title must be a string"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let validator = StringValidator::new().max(3);
        assert!(validator.validate(&json!("äöü")).is_ok());
    }

    #[test]
    fn custom_message_replaces_default() {
        let validator = StringValidator::new().min(3).with_message("Too short");
        let errors = validator.validate(&json!("a")).unwrap_err();
        assert_eq!(errors.messages(), vec!["Too short"]);
    }

    #[test]
    fn custom_rule_can_transform() {
        let validator = StringValidator::new()
            .rule("lowercase", |value, _| Ok(Some(value.to_lowercase())))
            .max(5);
        assert_eq!(validator.validate(&json!(" HeLLo ")).unwrap(), one("hello"));
    }

    #[test]
    fn array_mode_checks_each_element_type() {
        let validator = StringValidator::new().array();
        let errors = validator
            .validate_with(&json!(["a", 1, "b", null]), &ValidateOptions::field("tags"))
            .unwrap_err();
        assert_eq!(
            errors.messages(),
            vec!["tags[1] must be a string", "tags[3] must be a string"]
        );
    }

    #[test]
    fn array_mode_runs_rules_per_element() {
        let validator = StringValidator::new().array().min(2);

        let errors = validator
            .validate_with(&json!(["ok", "x", " y "]), &ValidateOptions::field("tags"))
            .unwrap_err();
        assert_eq!(
            errors.messages(),
            vec![
                "tags[1] must be at least 2 characters long.",
                "tags[2] must be at least 2 characters long."
            ]
        );

        assert_eq!(
            validator.validate(&json!([" ab ", "cd"])).unwrap(),
            Some(OneOrMany::Many(vec!["ab".to_string(), "cd".to_string()]))
        );
    }

    #[test]
    fn array_mode_absence_and_shape() {
        let required = StringValidator::new().array();
        assert_eq!(
            required.validate(&json!([])).unwrap_err().messages(),
            vec!["value is required"]
        );
        assert_eq!(
            required.validate(&json!("text")).unwrap_err().messages(),
            vec!["value must be an array"]
        );

        let optional = StringValidator::new().array().nullable();
        assert_eq!(optional.validate(&json!([])).unwrap(), None);
    }
}
