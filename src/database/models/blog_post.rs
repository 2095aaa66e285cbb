use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::row::RowReader;
use crate::database::query_builder::Table;
use crate::database::StorageError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl BlogPost {
    pub fn from_row(row: &Value) -> Result<Self, StorageError> {
        let r = RowReader::new(Table::BlogPosts, row)?;
        Ok(Self {
            id: r.id()?,
            title: r.text("title")?,
            content: r.text("content")?,
            excerpt: r.text("excerpt")?,
            author: r.text("author")?,
            image: r.text("image")?,
            created_at: r.timestamp("created_at"),
        })
    }
}
