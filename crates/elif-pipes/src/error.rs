//! Validation error types and handling

use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of an exhaustive validation run. An `Err` always carries at least one error.
pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// Key reported when a record fails to produce its rules, before any field is validated.
///
/// The leading underscore keeps it apart from real field names.
pub const PRE_CHECK_KEY: &str = "_pre-check";

/// Failure produced by a single action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ActionError {
    /// Human-readable error message
    #[serde(rename = "msg")]
    pub message: String,
    /// Code of the rule that failed, for programmatic handling
    pub code: String,
}

impl ActionError {
    /// Create a new action error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Validation failure for a single field: the field key plus the failing action's error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{key}: {cause}")]
pub struct ValidationError {
    /// The field that failed validation
    pub key: String,
    /// The error of the first action that failed on this field
    #[serde(flatten)]
    pub cause: ActionError,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(key: impl Into<String>, cause: ActionError) -> Self {
        Self {
            key: key.into(),
            cause,
        }
    }

    /// Create the error reported when rule generation itself failed
    pub fn pre_check(message: impl fmt::Display) -> Self {
        Self::new(PRE_CHECK_KEY, ActionError::new("pre_check", message.to_string()))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn message(&self) -> &str {
        &self.cause.message
    }

    pub fn code(&self) -> &str {
        &self.cause.code
    }

    /// Whether this error came from rule generation rather than from a field
    pub fn is_pre_check(&self) -> bool {
        self.key == PRE_CHECK_KEY
    }

    pub fn cause(&self) -> &ActionError {
        &self.cause
    }

    /// Drop the key and keep the underlying error
    pub fn into_cause(self) -> ActionError {
        self.cause
    }
}

/// Collection of field validation errors produced by exhaustive validation.
///
/// When filled concurrently the order reflects worker completion, not field
/// registration, so callers must not rely on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create a new empty validation errors collection
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add a single validation error
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Get the error reported for a specific field
    pub fn get(&self, key: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|error| error.key == key)
    }

    /// Check if a specific field has an error
    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys of every failing field, in collection order
    pub fn keys(&self) -> Vec<&str> {
        self.errors.iter().map(|error| error.key.as_str()).collect()
    }

    /// Merge another collection into this one
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Sort by field key. Useful when a stable order is needed for display.
    pub fn sort_by_key(&mut self) {
        self.errors.sort_by(|a, b| a.key.cmp(&b.key));
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Turn the collection into a result: `Ok(())` when empty, `Err(self)` otherwise.
    ///
    /// This is the only way an exhaustive run reports "no errors".
    pub fn into_result(self) -> ValidationResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Combine the causes of every entry into a single error value
    pub fn join(&self) -> JoinedError {
        JoinedError {
            causes: self.errors.iter().map(|error| error.cause.clone()).collect(),
        }
    }

    /// Convert to a JSON-serializable format for API responses
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": "validation_failed",
                "message": "Validation failed",
                "fields": self.errors
            }
        })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed for {} field(s):", self.errors.len())?;
            for error in &self.errors {
                write!(f, "\n  {}: {}", error.key, error.cause.message)?;
            }
            Ok(())
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Every failing field's cause combined into one error, one message per line
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
pub struct JoinedError {
    causes: Vec<ActionError>,
}

impl JoinedError {
    pub fn causes(&self) -> &[ActionError] {
        &self.causes
    }
}

impl fmt::Display for JoinedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for cause in &self.causes {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{}", cause.message)?;
            first = false;
        }
        Ok(())
    }
}

impl From<ValidationErrors> for JoinedError {
    fn from(errors: ValidationErrors) -> Self {
        errors.join()
    }
}

/// Failure of a decode-then-validate call.
///
/// Decoding runs first; when it fails no rule is generated and no field is validated.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to decode input: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    PreCheck(ValidationError),

    #[error("{0}")]
    Invalid(ValidationErrors),
}

impl ParseError {
    pub fn is_decode(&self) -> bool {
        matches!(self, ParseError::Decode(_))
    }

    /// Field-level errors, if the input decoded and reached validation
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ParseError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}
