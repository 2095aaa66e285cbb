use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::row::RowReader;
use crate::database::query_builder::Table;
use crate::database::StorageError;
use crate::schema::message::DEFAULT_INTEREST;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub message: String,
    pub interest: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn from_row(row: &Value) -> Result<Self, StorageError> {
        let r = RowReader::new(Table::Messages, row)?;
        Ok(Self {
            id: r.id()?,
            name: r.text("name")?,
            email: r.text("email")?,
            phone: r.text("phone")?,
            location: r.text("location")?,
            message: r.text("message")?,
            interest: r.text_or("interest", DEFAULT_INTEREST),
            is_read: r.flag("is_read"),
            created_at: r.timestamp("created_at"),
        })
    }
}
