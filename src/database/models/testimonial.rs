use serde::Serialize;
use serde_json::Value;

use super::row::RowReader;
use crate::database::query_builder::Table;
use crate::database::StorageError;
use crate::schema::DEFAULT_AVATAR;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Testimonial {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub message: String,
    pub rating: i32,
    pub image: String,
}

impl Testimonial {
    pub fn from_row(row: &Value) -> Result<Self, StorageError> {
        let r = RowReader::new(Table::Testimonials, row)?;
        Ok(Self {
            id: r.id()?,
            name: r.text("name")?,
            location: r.text("location")?,
            message: r.text("message")?,
            rating: r.integer("rating")?,
            image: r.text_or("image", DEFAULT_AVATAR),
        })
    }
}
