//! Declarative validator configuration.
//!
//! Validators and schemas can be described in JSON (or any serde format)
//! and built at startup:
//!
//! ```json
//! {
//!   "fields": {
//!     "age":      { "type": "integer", "min": 18 },
//!     "email":    { "type": "email", "max": 120, "messages": { "format": "Bad email" } },
//!     "avatar":   { "type": "file", "nullable": true, "types": ["png", "jpg"], "max_size": 2 }
//!   }
//! }
//! ```
//!
//! `messages` maps a rule code to a custom message for that rule.

use crate::error::ConfigError;
use crate::schema::ObjectSchema;
use crate::traits::{FieldValidator, Validator};
use crate::validators::{
    BooleanValidator, EmailValidator, FileValidator, IntegerValidator, PasswordValidator,
    StringValidator,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Custom messages keyed by rule code.
pub type Messages = BTreeMap<String, String>;

/// Configuration of a single field validator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldConfig {
    String {
        #[serde(default)]
        nullable: bool,
        #[serde(default)]
        array: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        messages: Messages,
    },
    Integer {
        #[serde(default)]
        nullable: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
        #[serde(default)]
        positive: bool,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        messages: Messages,
    },
    Boolean {
        #[serde(default)]
        nullable: bool,
    },
    Email {
        #[serde(default)]
        nullable: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        messages: Messages,
    },
    Password {
        #[serde(default)]
        nullable: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        #[serde(default)]
        contains_number: bool,
        #[serde(default)]
        contains_special_char: bool,
        #[serde(default)]
        contains_uppercase: bool,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        messages: Messages,
    },
    File {
        #[serde(default)]
        nullable: bool,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        types: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_size: Option<u64>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        messages: Messages,
    },
}

/// Apply the custom message for `code`, if one is configured.
fn message<V>(validator: V, code: &str, messages: &Messages, set: impl FnOnce(V, String) -> V) -> V {
    match messages.get(code) {
        Some(text) => set(validator, text.clone()),
        None => validator,
    }
}

impl FieldConfig {
    /// Build the configured validator.
    pub fn build(&self) -> Result<Box<dyn FieldValidator>, ConfigError> {
        let validator = match self {
            FieldConfig::String {
                nullable,
                array,
                min,
                max,
                messages,
            } => {
                let mut v = StringValidator::new();
                if *nullable {
                    v = v.nullable();
                }
                if *array {
                    v = v.array();
                }
                if let Some(min) = min {
                    v = message(v.min(*min), "min", messages, |v, m| v.with_message(m));
                }
                if let Some(max) = max {
                    v = message(v.max(*max), "max", messages, |v, m| v.with_message(m));
                }
                v.boxed()
            }
            FieldConfig::Integer {
                nullable,
                min,
                max,
                positive,
                messages,
            } => {
                let mut v = IntegerValidator::new();
                if *nullable {
                    v = v.nullable();
                }
                if let Some(min) = min {
                    v = message(v.min(*min), "min", messages, |v, m| v.with_message(m));
                }
                if let Some(max) = max {
                    v = message(v.max(*max), "max", messages, |v, m| v.with_message(m));
                }
                if *positive {
                    v = message(v.positive(), "positive", messages, |v, m| v.with_message(m));
                }
                v.boxed()
            }
            FieldConfig::Boolean { nullable } => {
                let v = BooleanValidator::new();
                if *nullable {
                    v.nullable().boxed()
                } else {
                    v.boxed()
                }
            }
            FieldConfig::Email {
                nullable,
                max,
                messages,
            } => {
                let mut v = message(EmailValidator::new(), "format", messages, |v, m| {
                    v.with_message(m)
                });
                if *nullable {
                    v = v.nullable();
                }
                if let Some(max) = max {
                    v = message(v.max(*max), "max", messages, |v, m| v.with_message(m));
                }
                v.boxed()
            }
            FieldConfig::Password {
                nullable,
                min,
                contains_number,
                contains_special_char,
                contains_uppercase,
                messages,
            } => {
                let mut v = PasswordValidator::new();
                if *nullable {
                    v = v.nullable();
                }
                if let Some(min) = min {
                    v = message(v.min(*min), "min", messages, |v, m| v.with_message(m));
                }
                if *contains_number {
                    v = message(v.contains_number(), "contains_number", messages, |v, m| {
                        v.with_message(m)
                    });
                }
                if *contains_special_char {
                    v = message(
                        v.contains_special_char(),
                        "contains_special_char",
                        messages,
                        |v, m| v.with_message(m),
                    );
                }
                if *contains_uppercase {
                    v = message(v.contains_uppercase(), "contains_uppercase", messages, |v, m| {
                        v.with_message(m)
                    });
                }
                v.boxed()
            }
            FieldConfig::File {
                nullable,
                types,
                max_size,
                messages,
            } => {
                let mut v = FileValidator::new();
                if *nullable {
                    v = v.nullable();
                }
                if !types.is_empty() {
                    v = message(v.types(types)?, "file_type", messages, |v, m| v.with_message(m));
                }
                if let Some(max_size) = max_size {
                    v = message(v.max_size(*max_size), "max_size", messages, |v, m| {
                        v.with_message(m)
                    });
                }
                v.boxed()
            }
        };
        Ok(validator)
    }
}

/// Configuration of an object schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaConfig {
    /// Field name to field configuration
    pub fields: BTreeMap<String, FieldConfig>,
}

impl SchemaConfig {
    /// Parse a schema configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the configured schema.
    pub fn build(&self) -> Result<ObjectSchema, ConfigError> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for (name, field) in &self.fields {
            fields.push((name.clone(), field.build()?));
        }
        tracing::debug!(fields = fields.len(), "schema built from configuration");
        Ok(ObjectSchema::new(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SIGNUP: &str = r#"{
        "fields": {
            "username": { "type": "string", "min": 3, "max": 20 },
            "age": { "type": "integer", "min": 18, "messages": { "min": "Adults only" } },
            "email": { "type": "email", "messages": { "format": "Bad email" } },
            "password": { "type": "password", "min": 8, "contains_number": true },
            "newsletter": { "type": "boolean", "nullable": true },
            "avatar": { "type": "file", "nullable": true, "types": ["png"], "max_size": 1 }
        }
    }"#;

    #[test]
    fn builds_schema_from_json() {
        let schema = SchemaConfig::from_json(SIGNUP).unwrap().build().unwrap();
        assert_eq!(schema.len(), 6);

        let errors = schema
            .parse_data(&json!({
                "username": "jo",
                "age": 15,
                "email": "nope",
                "password": "password1",
                "avatar": { "type": "image/gif", "size": 10 }
            }))
            .unwrap_err();

        assert_eq!(errors.get("username"), Some("username must be at least 3 characters long."));
        assert_eq!(errors.get("age"), Some("Adults only"));
        assert_eq!(errors.get("email"), Some("Bad email"));
        assert_eq!(errors.get("password"), None);
        assert_eq!(errors.get("newsletter"), None);
        assert_eq!(errors.get("avatar"), Some("avatar must be one of the following types: png."));
    }

    #[test]
    fn unknown_extension_fails_build() {
        let config = SchemaConfig::from_json(
            r#"{ "fields": { "upload": { "type": "file", "types": ["exe"] } } }"#,
        )
        .unwrap();
        assert!(matches!(config.build(), Err(ConfigError::UnknownExtension(_))));
    }

    #[test]
    fn unknown_validator_type_is_rejected() {
        let err = SchemaConfig::from_json(r#"{ "fields": { "x": { "type": "uuid" } } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }

    #[test]
    fn field_config_defaults() {
        let config: FieldConfig = serde_json::from_value(json!({ "type": "integer" })).unwrap();
        assert_eq!(
            config,
            FieldConfig::Integer {
                nullable: false,
                min: None,
                max: None,
                positive: false,
                messages: Messages::new(),
            }
        );
    }
}
