use serde_json::Value;

use super::{Fields, ValidationError};
use crate::database::query_builder::SqlValue;

pub const DEFAULT_INTEREST: &str = "other";

/// Contact-form submission. `location` is where the sender is looking;
/// `interest` is the free-text category.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub message: String,
    pub interest: String,
}

impl InsertMessage {
    pub fn parse(body: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::from_value(body)?;

        let name = f.text("name");
        let email = f.email("email");
        let phone = f.text("phone");
        let location = f.text("location");
        let message = f.text("message");
        let interest = f.text_or("interest", DEFAULT_INTEREST);

        f.finish(|| {
            Some(Self {
                name: name?,
                email: email?,
                phone: phone?,
                location: location?,
                message: message?,
                interest: interest?,
            })
        })
    }

    /// New messages always start unread.
    pub fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("name", SqlValue::Text(self.name.clone())),
            ("email", SqlValue::Text(self.email.clone())),
            ("phone", SqlValue::Text(self.phone.clone())),
            ("location", SqlValue::Text(self.location.clone())),
            ("message", SqlValue::Text(self.message.clone())),
            ("interest", SqlValue::Text(self.interest.clone())),
            ("is_read", SqlValue::Bool(false)),
        ]
    }
}

/// Body of `PUT /messages/:id/read`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadStatus {
    pub is_read: bool,
}

impl ReadStatus {
    pub fn parse(body: &Value) -> Result<Self, ValidationError> {
        match body.get("isRead") {
            Some(Value::Bool(is_read)) => Ok(Self { is_read: *is_read }),
            _ => Err(ValidationError::single("isRead", "isRead field must be a boolean")),
        }
    }
}
