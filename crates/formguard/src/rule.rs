//! Rules and ordered rule chains.
//!
//! A [`Rule`] is the atomic unit of validation: a check bound to a value and a
//! field name. Validators own a [`RuleSet`] and run every rule in insertion
//! order, collecting each failure instead of stopping at the first one.

use crate::error::{RuleError, ValidationErrors, ValidationResult};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Outcome of a single rule.
///
/// `Ok(None)` passes with the working value unchanged, `Ok(Some(v))` passes
/// and replaces the working value with `v`, `Err(_)` fails.
pub type RuleOutcome<T> = Result<Option<T>, RuleError>;

/// Type alias for rule check functions to reduce complexity.
type RuleFn<T> = Box<dyn Fn(&T, &str) -> RuleOutcome<T> + Send + Sync>;

/// A single validation rule.
pub struct Rule<T> {
    code: String,
    message: Option<String>,
    params: HashMap<String, serde_json::Value>,
    check: RuleFn<T>,
}

impl<T> Rule<T> {
    /// Create a rule from a function receiving the working value and the
    /// field name.
    pub fn new<F>(code: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T, &str) -> RuleOutcome<T> + Send + Sync + 'static,
    {
        Self {
            code: code.into(),
            message: None,
            params: HashMap::new(),
            check: Box::new(check),
        }
    }

    /// Create a rule from a predicate and a message builder.
    ///
    /// `describe` receives the field name and produces the default message.
    pub fn check<P, D>(code: impl Into<String>, predicate: P, describe: D) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        D: Fn(&str) -> String + Send + Sync + 'static,
    {
        let code = code.into();
        let error_code = code.clone();
        Self::new(code, move |value, field| {
            if predicate(value) {
                Ok(None)
            } else {
                Err(RuleError::new(error_code.clone(), describe(field)))
            }
        })
    }

    /// Attach a parameter reported with every failure of this rule.
    pub fn param(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.params.insert(key.into(), v);
        }
        self
    }

    /// Replace the default message. Custom messages are used verbatim.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The rule code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Run the rule against a value.
    pub fn apply(&self, value: &T, field: &str) -> RuleOutcome<T> {
        (self.check)(value, field).map_err(|mut error| {
            if let Some(message) = &self.message {
                error.message = message.clone();
            }
            for (key, value) in &self.params {
                error.params.entry(key.clone()).or_insert_with(|| value.clone());
            }
            error
        })
    }
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// An ordered, append-only list of rules.
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
}

impl<T> Default for RuleSet<T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<T> RuleSet<T> {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    pub fn push(&mut self, rule: Rule<T>) {
        self.rules.push(rule);
    }

    /// Override the message of the most recently added rule.
    ///
    /// Returns `false` when the set is empty.
    pub fn set_last_message(&mut self, message: String) -> bool {
        match self.rules.last_mut() {
            Some(rule) => {
                rule.message = Some(message);
                true
            }
            None => false,
        }
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if no rules were added.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule codes in insertion order.
    pub fn codes(&self) -> Vec<&str> {
        self.rules.iter().map(Rule::code).collect()
    }

    /// Run every rule in order against `value`.
    ///
    /// All rules execute even after a failure. A passing rule may replace the
    /// working value; the final working value is returned when nothing failed.
    pub fn run(&self, value: T, field: &str) -> ValidationResult<T> {
        let mut working = value;
        let mut errors = Vec::new();

        for rule in &self.rules {
            match rule.apply(&working, field) {
                Ok(Some(next)) => working = next,
                Ok(None) => {}
                Err(error) => {
                    tracing::trace!(field, code = %error.code, "rule failed");
                    errors.push(error);
                }
            }
        }

        match ValidationErrors::from_vec(errors) {
            None => Ok(working),
            Some(errors) => Err(errors),
        }
    }
}

impl<T> fmt::Debug for RuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.codes()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn min_len(n: usize) -> Rule<String> {
        Rule::check(
            "min",
            move |v: &String| v.len() >= n,
            move |field| format!("{field} must be at least {n} characters long."),
        )
        .param("min", n)
    }

    #[test]
    fn all_rules_run_after_failure() {
        let mut rules = RuleSet::new();
        rules.push(min_len(5));
        rules.push(Rule::check("digit", |v: &String| v.chars().any(|c| c.is_ascii_digit()), |f| {
            format!("{f} needs a digit")
        }));

        let errors = rules.run("abc".to_string(), "code").unwrap_err();
        assert_eq!(errors.codes(), vec!["min", "digit"]);
        assert_eq!(errors.first().params["min"], 5);
    }

    #[test]
    fn passing_rule_replaces_working_value() {
        let mut rules: RuleSet<String> = RuleSet::new();
        rules.push(Rule::new("upper", |v: &String, _| Ok(Some(v.to_uppercase()))));
        rules.push(min_len(2));

        assert_eq!(rules.run("ab".to_string(), "value").unwrap(), "AB");
    }

    #[test]
    fn failure_is_not_reset_by_later_transform() {
        let mut rules: RuleSet<String> = RuleSet::new();
        rules.push(min_len(3));
        rules.push(Rule::new("pad", |v: &String, _| Ok(Some(format!("{v}xxx")))));
        rules.push(min_len(3));

        let errors = rules.run("a".to_string(), "value").unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn custom_message_used_verbatim() {
        let mut rules = RuleSet::new();
        rules.push(min_len(3));
        assert!(rules.set_last_message("Too short!".to_string()));

        let errors = rules.run("a".to_string(), "name").unwrap_err();
        assert_eq!(errors.messages(), vec!["Too short!"]);
    }

    #[test]
    fn set_last_message_on_empty_set() {
        let mut rules: RuleSet<String> = RuleSet::new();
        assert!(!rules.set_last_message("unused".to_string()));
        assert!(rules.run("anything".to_string(), "value").is_ok());
    }
}
