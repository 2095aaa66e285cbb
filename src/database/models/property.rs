use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::row::RowReader;
use crate::database::query_builder::Table;
use crate::database::StorageError;
use crate::schema::property::DEFAULT_SIZE_UNIT;
use crate::schema::Price;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub price_unit: Option<String>,
    pub location: String,
    pub size: f64,
    pub size_unit: String,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub video_url: Option<String>,
    pub is_featured: bool,
    pub property_type: String,
    pub created_at: DateTime<Utc>,
}

impl Property {
    pub fn from_row(row: &Value) -> Result<Self, StorageError> {
        let r = RowReader::new(Table::Properties, row)?;

        let price = r
            .raw("price")
            .and_then(Price::from_stored)
            .ok_or_else(|| StorageError::Corrupt {
                table: Table::Properties.name(),
                detail: "price is missing".to_string(),
            })?;

        Ok(Self {
            id: r.id()?,
            title: r.text("title")?,
            description: r.text("description")?,
            price,
            price_unit: r.nullable_text("price_unit"),
            location: r.text("location")?,
            size: r.number("size")?,
            size_unit: r.text_or("size_unit", DEFAULT_SIZE_UNIT),
            features: r.text_list("features"),
            images: r.text_list("images"),
            video_url: r.nullable_text("video_url"),
            is_featured: r.flag("is_featured"),
            property_type: r.text("property_type")?,
            created_at: r.timestamp("created_at"),
        })
    }
}
