//! Request validation
//!
//! Declarative constraints live on the model types as `validator` derives. This
//! module holds the shared patterns, the `Validated<T>` wrapper that proves a
//! value passed its checks, and the flattening of `validator`'s nested error tree
//! into a list of field-level violations.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::LazyLock;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Public GitHub repository URL, optionally with a trailing slash.
pub static GITHUB_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://github\.com/[A-Za-z0-9._-]+/[A-Za-z0-9._-]+/?$")
        .expect("GitHub URL pattern is valid")
});

/// Identifier minted by ingestion and consumed by chat.
pub static REPOSITORY_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^repo-[a-f0-9]{8}$").expect("repository id pattern is valid"));

/// Allowed speakers in a conversation history entry.
pub static CONVERSATION_ROLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(user|agent)$").expect("role pattern is valid"));

/// Returns true when `id` has the `repo-xxxxxxxx` shape.
pub fn is_repository_id(id: &str) -> bool {
    REPOSITORY_ID_RE.is_match(id)
}

/// Rejects NaN and infinities, which `range` lets through and JSON cannot carry.
pub fn require_finite(value: impl std::borrow::Borrow<f64>) -> Result<(), ValidationError> {
    if value.borrow().is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite")
            .with_message(Cow::Borrowed("Must be a finite number")))
    }
}

/// Fields whose submitted values must never be echoed back.
const REDACTED_FIELDS: &[&str] = &["github_token"];

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct FieldViolation {
    /// Dotted path to the offending field, e.g. `conversation_history[3].role`
    #[cfg_attr(feature = "openapi", schema(example = "repository_url"))]
    pub field: String,
    /// Constraint that failed (`length`, `regex`, `range`, ...)
    #[cfg_attr(feature = "openapi", schema(example = "regex"))]
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The submitted value, omitted for secrets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// Raised when a value fails one or more declared constraints.
#[derive(Debug, Clone, Error)]
#[error("validation failed for {} field(s): {}", .violations.len(), summarize(.violations))]
pub struct RequestValidationError {
    pub violations: Vec<FieldViolation>,
}

impl RequestValidationError {
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.field.as_str())
    }

    /// True if any violation was reported against `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields().any(|f| f == field)
    }
}

impl From<ValidationErrors> for RequestValidationError {
    fn from(errors: ValidationErrors) -> Self {
        Self {
            violations: flatten_errors(&errors),
        }
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} ({})", v.field, v.code))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Flatten `validator`'s tree of errors into a sorted list of violations.
pub fn flatten_errors(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldViolation>) {
    for (key, kind) in errors.errors() {
        let key: &str = &**key;
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    // Struct-level checks report under `__all__` and name their field in params.
                    let name: Cow<'_, str> = if key == "__all__" {
                        error
                            .params
                            .get("field")
                            .and_then(|v| v.as_str())
                            .map(|s| Cow::Owned(s.to_string()))
                            .unwrap_or(Cow::Borrowed("body"))
                    } else {
                        Cow::Borrowed(key)
                    };
                    let field = join_path(prefix, &name);
                    let redacted = REDACTED_FIELDS.contains(&&*name);
                    out.push(FieldViolation {
                        field,
                        code: error.code.to_string(),
                        message: error.message.as_ref().map(|m| m.to_string()),
                        value: if redacted {
                            None
                        } else {
                            error.params.get("value").cloned()
                        },
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                collect(inner, &join_path(prefix, key), out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    let path = format!("{}[{}]", join_path(prefix, key), index);
                    collect(inner, &path, out);
                }
            }
        }
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// A value that has passed all of its declared constraints.
///
/// The only way to obtain one is [`Validated::new`], so collaborators that take a
/// `Validated<T>` can never observe malformed input.
#[derive(Debug, Clone)]
pub struct Validated<T>(T);

impl<T: Validate> Validated<T> {
    pub fn new(value: T) -> Result<Self, RequestValidationError> {
        value.validate()?;
        Ok(Self(value))
    }
}

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// Truncate `text` to at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
