use serde::Serialize;
use serde_json::Value;

use super::row::RowReader;
use crate::database::query_builder::Table;
use crate::database::StorageError;

/// The admin account. The bcrypt hash never leaves the credential check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    pub fn from_row(row: &Value) -> Result<Self, StorageError> {
        let r = RowReader::new(Table::Users, row)?;
        Ok(Self {
            id: r.id()?,
            username: r.text("username")?,
            password_hash: r.text("password")?,
        })
    }
}
