//! Error types for validation results and validator configuration.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;

/// Error from a single validation rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleError {
    /// The rule code (e.g., "required", "min", "format")
    pub code: String,
    /// Human-readable error message, with the field name already applied
    pub message: String,
    /// Optional parameters describing the failure
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, serde_json::Value>,
}

impl RuleError {
    /// Create a new rule error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: HashMap::new(),
        }
    }

    /// Add a parameter to the error.
    pub fn param(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.params.insert(key.into(), v);
        }
        self
    }

    /// The `"<field> is required"` error produced when a non-nullable
    /// validator receives an absent value.
    pub fn required(field: &str) -> Self {
        Self::new("required", format!("{field} is required"))
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for RuleError {}

/// All rule failures collected by one `validate` call.
///
/// Never empty: a failed validation always carries at least one error.
/// Deserializing an empty list fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawValidationErrors")]
pub struct ValidationErrors {
    errors: Vec<RuleError>,
}

#[derive(Deserialize)]
struct RawValidationErrors {
    errors: Vec<RuleError>,
}

impl TryFrom<RawValidationErrors> for ValidationErrors {
    type Error = String;

    fn try_from(raw: RawValidationErrors) -> Result<Self, Self::Error> {
        Self::from_vec(raw.errors).ok_or_else(|| "validation errors must not be empty".to_string())
    }
}

impl ValidationErrors {
    /// Create a collection holding a single error.
    pub fn new(error: RuleError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Build a collection from a list, returning `None` when it is empty.
    pub fn from_vec(errors: Vec<RuleError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Append an error.
    pub fn push(&mut self, error: RuleError) {
        self.errors.push(error);
    }

    /// Append every error of another collection.
    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// The first error, in rule execution order.
    pub fn first(&self) -> &RuleError {
        // from_vec/new guarantee at least one element
        &self.errors[0]
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always `false`; the collection holds at least one error.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over the errors in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleError> {
        self.errors.iter()
    }

    /// The error messages in execution order.
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// The rule codes in execution order.
    pub fn codes(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.code.as_str()).collect()
    }

    /// Consume into the underlying list.
    pub fn into_vec(self) -> Vec<RuleError> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<RuleError> for ValidationErrors {
    fn from(error: RuleError) -> Self {
        Self::new(error)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = RuleError;
    type IntoIter = std::vec::IntoIter<RuleError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Per-field errors produced by [`ObjectSchema::parse_data`](crate::ObjectSchema::parse_data).
///
/// Holds exactly one message per failing field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaErrors {
    /// Map of field name to its error message
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl SchemaErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the error for a field, keeping an earlier one if present.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_insert_with(|| message.into());
    }

    /// Get the error message for a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Check if there are any errors.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the number of failing fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Get all field names with errors.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Convert to the standard API error envelope.
    pub fn to_api_error(&self) -> ApiValidationError {
        let fields = self
            .fields
            .iter()
            .map(|(field, message)| FieldErrorResponse {
                field: field.clone(),
                message: message.clone(),
            })
            .collect();

        ApiValidationError {
            error: ErrorBody {
                error_type: "validation_error".to_string(),
                message: "Validation failed".to_string(),
                fields,
            },
        }
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: {} field(s)", self.len())
    }
}

impl std::error::Error for SchemaErrors {}

/// API response format for schema validation errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiValidationError {
    pub error: ErrorBody,
}

/// Error body in API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
    pub fields: Vec<FieldErrorResponse>,
}

/// Single field error in API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldErrorResponse {
    pub field: String,
    pub message: String,
}

/// Errors raised while configuring validators.
///
/// These are programming or configuration mistakes, reported by the
/// configuring call itself and never deferred to validation time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unsupported file extension: {0}")]
    UnknownExtension(String),

    #[error("Invalid validator configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Result of validating a single value.
pub type ValidationResult<T> = Result<T, ValidationErrors>;
