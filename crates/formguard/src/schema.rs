//! Object schemas: field name to validator mappings validated in one pass.

use crate::error::SchemaErrors;
use crate::traits::{FieldValidator, Validator};
use serde_json::{Map, Value};
use std::fmt;

/// Field whose presence in a schema enables the confirmation check.
const PASSWORD_FIELD: &str = "password";
/// Input key compared against [`PASSWORD_FIELD`].
const CONFIRMATION_FIELD: &str = "password_confirmation";

/// Data produced by a successful [`ObjectSchema::parse_data`].
pub type SchemaData = Map<String, Value>;

/// A fixed mapping of field names to validators.
///
/// ## Example
///
/// ```rust
/// use formguard::prelude::*;
/// use serde_json::json;
///
/// let schema = ObjectSchema::builder()
///     .field("age", formguard::integer().min(18))
///     .field("email", formguard::email())
///     .build();
///
/// let errors = schema
///     .parse_data(&json!({ "age": 15, "email": "a@b.co" }))
///     .unwrap_err();
/// assert_eq!(errors.get("age"), Some("age must be at least 18."));
/// ```
pub struct ObjectSchema {
    fields: Vec<(String, Box<dyn FieldValidator>)>,
}

impl ObjectSchema {
    /// Create a schema from `(name, validator)` pairs.
    ///
    /// A repeated name replaces the earlier validator in place.
    pub fn new<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Box<dyn FieldValidator>)>,
        K: Into<String>,
    {
        let mut schema = Self { fields: Vec::new() };
        for (name, validator) in fields {
            schema.insert(name.into(), validator);
        }
        schema
    }

    /// Start building a schema field by field.
    pub fn builder() -> ObjectSchemaBuilder {
        ObjectSchemaBuilder::default()
    }

    fn insert(&mut self, name: String, validator: Box<dyn FieldValidator>) {
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = validator,
            None => self.fields.push((name, validator)),
        }
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Check whether the schema declares a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(existing, _)| existing == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate every field of `data`.
    ///
    /// Missing keys (and non-object input) are validated as `null`. Every
    /// field is validated regardless of earlier failures, but only the first
    /// error of each failing field is kept. When the schema declares
    /// `password` and the input has a `password_confirmation` key, the two
    /// raw values must be equal.
    pub fn parse_data(&self, data: &Value) -> Result<SchemaData, SchemaErrors> {
        let input = data.as_object();
        let mut output = Map::new();
        let mut errors = SchemaErrors::new();

        for (name, validator) in &self.fields {
            let raw = input.and_then(|o| o.get(name)).unwrap_or(&Value::Null);
            match validator.validate_field(raw, name) {
                Ok(value) => {
                    output.insert(name.clone(), value);
                }
                Err(field_errors) => {
                    tracing::trace!(
                        field = %name,
                        validator = validator.field_kind(),
                        dropped = field_errors.len() - 1,
                        "field failed"
                    );
                    errors.insert(name.clone(), field_errors.first().message.clone());
                }
            }
        }

        if self.has_field(PASSWORD_FIELD) {
            if let Some(confirmation) = input.and_then(|o| o.get(CONFIRMATION_FIELD)) {
                let password = input
                    .and_then(|o| o.get(PASSWORD_FIELD))
                    .unwrap_or(&Value::Null);
                if password != confirmation {
                    errors.insert(CONFIRMATION_FIELD, "Passwords do not match");
                }
            }
        }

        tracing::debug!(
            fields = self.fields.len(),
            failed = errors.len(),
            "schema validation finished"
        );

        if errors.is_empty() {
            Ok(output)
        } else {
            Err(errors)
        }
    }
}

impl fmt::Debug for ObjectSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.fields.iter().map(|(name, v)| (name, v.field_kind())))
            .finish()
    }
}

/// Builder for [`ObjectSchema`].
#[derive(Default)]
pub struct ObjectSchemaBuilder {
    fields: Vec<(String, Box<dyn FieldValidator>)>,
}

impl ObjectSchemaBuilder {
    /// Add a field validated by `validator`.
    pub fn field<V>(self, name: impl Into<String>, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.field_boxed(name, validator.boxed())
    }

    /// Add a field with an already type-erased validator.
    pub fn field_boxed(
        mut self,
        name: impl Into<String>,
        validator: Box<dyn FieldValidator>,
    ) -> Self {
        self.fields.push((name.into(), validator));
        self
    }

    /// Finish the schema. Its mapping is fixed from here on.
    pub fn build(self) -> ObjectSchema {
        ObjectSchema::new(self.fields)
    }
}
