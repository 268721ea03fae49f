//! File descriptor validator for single uploads and batches.

use crate::coerce::{self, OneOrMany};
use crate::error::{ConfigError, RuleError, ValidationErrors, ValidationResult};
use crate::mime::mime_type_for_extension;
use crate::rule::{Rule, RuleOutcome, RuleSet};
use crate::traits::{absent, traced, ValidateOptions, Validator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

/// Caller-supplied description of an uploaded file.
///
/// File contents are never read; only the MIME type and byte size matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// MIME type, e.g. `image/png`
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Size in bytes
    pub size: u64,
}

impl FileDescriptor {
    /// Create a descriptor.
    pub fn new(mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            mime_type: mime_type.into(),
            size,
        }
    }

    /// Read a descriptor from a JSON object carrying `type` and `size`.
    ///
    /// Other keys are ignored. Returns `None` for any other shape.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mime_type = object.get("type")?.as_str()?;
        let size = object.get("size")?.as_u64()?;
        Some(Self::new(mime_type, size))
    }
}

impl From<FileDescriptor> for Value {
    fn from(file: FileDescriptor) -> Self {
        serde_json::json!({ "type": file.mime_type, "size": file.size })
    }
}

/// Validates file descriptors, singly or as a batch.
///
/// A sequence input switches to multi-file mode: each element is validated
/// under the label `"<field> <n>"` (1-based), and the batch passes only if
/// every element passes.
#[derive(Debug, Default)]
pub struct FileValidator {
    rules: RuleSet<FileDescriptor>,
    nullable: bool,
}

impl FileValidator {
    /// Create a file validator with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `null` and empty sequences as a valid `null`.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Restrict files to the MIME types of the given extensions.
    ///
    /// Fails immediately if an extension is not in the supported table.
    ///
    /// ```rust
    /// use formguard::FileValidator;
    ///
    /// assert!(FileValidator::new().types(&["jpg", "png"]).is_ok());
    /// assert!(FileValidator::new().types(&["exe"]).is_err());
    /// ```
    pub fn types<S: AsRef<str>>(mut self, extensions: &[S]) -> Result<Self, ConfigError> {
        let names: Vec<String> = extensions
            .iter()
            .map(|e| AsRef::<str>::as_ref(e).to_string())
            .collect();

        let mut allowed: Vec<&'static str> = Vec::with_capacity(names.len());
        for extension in &names {
            let mime = mime_type_for_extension(extension).ok_or_else(|| {
                tracing::warn!(extension = %extension, "unsupported file extension");
                ConfigError::UnknownExtension(extension.clone())
            })?;
            if !allowed.contains(&mime) {
                allowed.push(mime);
            }
        }

        let listed = names.join(", ");
        self.rules.push(
            Rule::check(
                "file_type",
                move |file: &FileDescriptor| allowed.contains(&file.mime_type.as_str()),
                move |field| format!("{field} must be one of the following types: {listed}."),
            )
            .param("types", &names),
        );
        Ok(self)
    }

    /// Limit files to `megabytes` MiB.
    pub fn max_size(mut self, megabytes: u64) -> Self {
        let limit = megabytes.saturating_mul(BYTES_PER_MEGABYTE);
        self.rules.push(
            Rule::check(
                "max_size",
                move |file: &FileDescriptor| file.size <= limit,
                move |field| format!("{field} must not exceed {megabytes} MB."),
            )
            .param("max_size", limit),
        );
        self
    }

    /// Add a custom rule, run in insertion order with the built-in ones.
    pub fn rule<F>(mut self, code: impl Into<String>, check: F) -> Self
    where
        F: Fn(&FileDescriptor, &str) -> RuleOutcome<FileDescriptor> + Send + Sync + 'static,
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

    fn validate_one(&self, value: &Value, label: &str) -> ValidationResult<FileDescriptor> {
        match FileDescriptor::from_value(value) {
            Some(file) => self.rules.run(file, label),
            None => Err(RuleError::new("invalid_format", format!("{label} has an invalid format")).into()),
        }
    }

    fn validate_many(&self, items: &[Value], field: &str) -> ValidationResult<Vec<FileDescriptor>> {
        let mut files = Vec::with_capacity(items.len());
        let mut failures: Option<ValidationErrors> = None;

        for (index, item) in items.iter().enumerate() {
            let label = format!("{field} {}", index + 1);
            match self.validate_one(item, &label) {
                Ok(file) => files.push(file),
                Err(errors) => match failures.as_mut() {
                    Some(all) => all.extend(errors),
                    None => failures = Some(errors),
                },
            }
        }

        match failures {
            None => Ok(files),
            Some(errors) => Err(errors),
        }
    }
}

impl Validator for FileValidator {
    type Output = OneOrMany<FileDescriptor>;

    const DEFAULT_FIELD_NAME: &'static str = "file";

    fn validate_with(
        &self,
        value: &Value,
        options: &ValidateOptions,
    ) -> ValidationResult<Option<Self::Output>> {
        let field = options.field_name_or(Self::DEFAULT_FIELD_NAME);

        let result = if coerce::is_null_or_empty_seq(value) {
            absent(self.nullable, field)
        } else if let Value::Array(items) = value {
            self.validate_many(items, field)
                .map(|files| Some(OneOrMany::Many(files)))
        } else {
            self.validate_one(value, field)
                .map(|file| Some(OneOrMany::One(file)))
        };

        traced(self.kind(), field, result)
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}
