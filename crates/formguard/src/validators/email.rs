//! Email validator with a built-in format rule.

use crate::coerce;
use crate::error::{RuleError, ValidationResult};
use crate::rule::{Rule, RuleOutcome, RuleSet};
use crate::traits::{absent, traced, ValidateOptions, Validator};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern is a valid regex")
    })
}

/// Validates email addresses.
///
/// The format rule is always the first rule in the chain; rules added later
/// still run when the format check fails.
#[derive(Debug)]
pub struct EmailValidator {
    rules: RuleSet<String>,
    nullable: bool,
}

impl Default for EmailValidator {
    fn default() -> Self {
        let mut rules = RuleSet::new();
        rules.push(Rule::check(
            "format",
            |value: &String| email_regex().is_match(value),
            |field| format!("{field} must be a valid email address."),
        ));
        Self {
            rules,
            nullable: false,
        }
    }
}

impl EmailValidator {
    /// Create an email validator with the built-in format rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an email validator whose format failure uses `message`.
    pub fn with_format_message(message: impl Into<String>) -> Self {
        Self::new().with_message(message)
    }

    /// Accept `null` and blank strings as a valid `null`.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Require the raw address to be at most `length` characters.
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

    /// Add a custom rule, e.g. a domain allow-list.
    pub fn rule<F>(mut self, code: impl Into<String>, check: F) -> Self
    where
        F: Fn(&String, &str) -> RuleOutcome<String> + Send + Sync + 'static,
    {
        self.rules.push(Rule::new(code, check));
        self
    }

    /// Replace the message of the most recently added rule.
    ///
    /// Called right after construction this overrides the format message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.rules.set_last_message(message.into());
        self
    }
}

impl Validator for EmailValidator {
    type Output = String;

    const DEFAULT_FIELD_NAME: &'static str = "Email";

    fn validate_with(
        &self,
        value: &Value,
        options: &ValidateOptions,
    ) -> ValidationResult<Option<String>> {
        let field = options.field_name_or(Self::DEFAULT_FIELD_NAME);

        let result = if coerce::is_blank(value) {
            absent(self.nullable, field)
        } else {
            match value {
                Value::String(address) => self.rules.run(address.clone(), field).map(Some),
                _ => Err(RuleError::new("type", format!("{field} must be a string")).into()),
            }
        };

        traced(self.kind(), field, result)
    }

    fn kind(&self) -> &'static str {
        "email"
    }
}
