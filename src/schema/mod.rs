//! Input schemas: turn untrusted JSON bodies into typed insert/patch records.
//!
//! Every parser walks the whole object and reports all failing fields at once.
//! A successful parse is the only input the storage layer accepts; it does not
//! re-validate.

pub mod blog;
pub mod message;
pub mod property;
pub mod testimonial;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub use blog::{BlogPostPatch, InsertBlogPost};
pub use message::{InsertMessage, ReadStatus};
pub use property::{InsertProperty, Price, PropertyPatch};
pub use testimonial::{InsertTestimonial, TestimonialPatch, DEFAULT_AVATAR};

/// One failing field: dotted path plus a human-readable reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} invalid field(s)", issues.len())]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue::new(path, message)],
        }
    }

    #[cfg(test)]
    pub fn has_path(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path == path)
    }
}

/// Field reader over a request body object that accumulates issues.
pub(crate) struct Fields<'a> {
    body: &'a Map<String, Value>,
    issues: Vec<FieldIssue>,
}

impl<'a> Fields<'a> {
    pub fn from_value(value: &'a Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(body) => Ok(Self {
                body,
                issues: Vec::new(),
            }),
            _ => Err(ValidationError::single("", "Request body must be a JSON object")),
        }
    }

    pub fn issue(&mut self, key: &str, message: impl Into<String>) {
        self.issues.push(FieldIssue::new(key, message));
    }

    /// Present and not null.
    fn given(&self, key: &str) -> Option<&'a Value> {
        self.body.get(key).filter(|v| !v.is_null())
    }

    /// Run `read` only when the key appears in the body at all (null included).
    pub fn when_present<T>(
        &mut self,
        key: &str,
        read: impl FnOnce(&mut Self, &str) -> Option<T>,
    ) -> Option<T> {
        if self.body.contains_key(key) {
            read(self, key)
        } else {
            None
        }
    }

    /// Required non-blank string.
    pub fn text(&mut self, key: &str) -> Option<String> {
        match self.given(key) {
            None => {
                self.issue(key, "Required");
                None
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                self.issue(key, "Must not be empty");
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.issue(key, "Expected string");
                None
            }
        }
    }

    /// Optional string. Absent, null and blank all read as `None`.
    pub fn nullable_text(&mut self, key: &str) -> Option<Option<String>> {
        match self.given(key) {
            None => Some(None),
            Some(Value::String(s)) if s.trim().is_empty() => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(_) => {
                self.issue(key, "Expected string");
                None
            }
        }
    }

    pub fn text_or(&mut self, key: &str, default: &str) -> Option<String> {
        self.nullable_text(key)
            .map(|v| v.unwrap_or_else(|| default.to_string()))
    }

    pub fn positive_number(&mut self, key: &str) -> Option<f64> {
        match self.given(key) {
            None => {
                self.issue(key, "Required");
                None
            }
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) if v.is_finite() && v > 0.0 => Some(v),
                _ => {
                    self.issue(key, "Number must be greater than 0");
                    None
                }
            },
            Some(_) => {
                self.issue(key, "Expected number");
                None
            }
        }
    }

    pub fn integer_between(&mut self, key: &str, min: i64, max: i64, message: &str) -> Option<i32> {
        match self.given(key) {
            None => {
                self.issue(key, "Required");
                None
            }
            Some(Value::Number(n)) => {
                let whole = n
                    .as_i64()
                    .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64));
                match whole {
                    Some(v) if (min..=max).contains(&v) => Some(v as i32),
                    Some(_) => {
                        self.issue(key, message);
                        None
                    }
                    None => {
                        self.issue(key, "Expected integer");
                        None
                    }
                }
            }
            Some(_) => {
                self.issue(key, "Expected number");
                None
            }
        }
    }

    pub fn flag_or(&mut self, key: &str, default: bool) -> Option<bool> {
        match self.given(key) {
            None => Some(default),
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => {
                self.issue(key, "Expected boolean");
                None
            }
        }
    }

    /// List of strings, given either as a JSON array or as one comma-separated
    /// string. Entries are trimmed and blanks dropped; absent reads as empty.
    pub fn string_list(&mut self, key: &str) -> Option<Vec<String>> {
        match self.given(key) {
            None => Some(Vec::new()),
            Some(Value::String(s)) => Some(split_list(s)),
            Some(Value::Array(items)) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    match item {
                        Value::String(s) if !s.trim().is_empty() => out.push(s.trim().to_string()),
                        Value::String(_) => {}
                        _ => self.issue(&format!("{}.{}", key, i), "Expected string"),
                    }
                }
                Some(out)
            }
            Some(_) => {
                self.issue(key, "Expected array of strings");
                None
            }
        }
    }

    pub fn email(&mut self, key: &str) -> Option<String> {
        let value = self.text(key)?;
        if is_valid_email(value.trim()) {
            Some(value.trim().to_string())
        } else {
            self.issue(key, "Invalid email address");
            None
        }
    }

    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.given(key)
    }

    pub fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, ValidationError> {
        if !self.issues.is_empty() {
            return Err(ValidationError {
                issues: self.issues,
            });
        }
        // Every reader that returned None recorded an issue
        value().ok_or_else(|| ValidationError::single("", "Invalid input"))
    }
}

pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Syntactic address check: one `@`, a non-empty local part, and a dotted
/// domain whose labels are non-empty. No whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return false;
    }
    labels.iter().all(|label| {
        !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}
