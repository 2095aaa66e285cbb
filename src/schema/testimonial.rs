use serde_json::Value;

use super::{Fields, ValidationError};
use crate::database::query_builder::SqlValue;

pub const DEFAULT_AVATAR: &str = "/images/default-avatar.png";

const RATING_MESSAGE: &str = "Rating must be between 1 and 5";

#[derive(Debug, Clone, PartialEq)]
pub struct InsertTestimonial {
    pub name: String,
    pub location: String,
    pub message: String,
    pub rating: i32,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestimonialPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub message: Option<String>,
    pub rating: Option<i32>,
    pub image: Option<String>,
}

fn rating(f: &mut Fields<'_>, key: &str) -> Option<i32> {
    f.integer_between(key, 1, 5, RATING_MESSAGE)
}

fn image(f: &mut Fields<'_>, key: &str) -> Option<String> {
    f.text_or(key, DEFAULT_AVATAR)
}

impl InsertTestimonial {
    pub fn parse(body: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::from_value(body)?;

        let name = f.text("name");
        let location = f.text("location");
        let message = f.text("message");
        let rating = rating(&mut f, "rating");
        let image = image(&mut f, "image");

        f.finish(|| {
            Some(Self {
                name: name?,
                location: location?,
                message: message?,
                rating: rating?,
                image: image?,
            })
        })
    }

    pub fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("name", SqlValue::Text(self.name.clone())),
            ("location", SqlValue::Text(self.location.clone())),
            ("message", SqlValue::Text(self.message.clone())),
            ("rating", SqlValue::Int(self.rating)),
            ("image", SqlValue::Text(self.image.clone())),
        ]
    }
}

impl TestimonialPatch {
    pub fn parse(body: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::from_value(body)?;

        let patch = Self {
            name: f.when_present("name", Fields::text),
            location: f.when_present("location", Fields::text),
            message: f.when_present("message", Fields::text),
            rating: f.when_present("rating", rating),
            image: f.when_present("image", image),
        };

        f.finish(|| Some(patch))
    }

    pub fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        let mut cols = Vec::new();
        if let Some(v) = &self.name {
            cols.push(("name", SqlValue::Text(v.clone())));
        }
        if let Some(v) = &self.location {
            cols.push(("location", SqlValue::Text(v.clone())));
        }
        if let Some(v) = &self.message {
            cols.push(("message", SqlValue::Text(v.clone())));
        }
        if let Some(v) = self.rating {
            cols.push(("rating", SqlValue::Int(v)));
        }
        if let Some(v) = &self.image {
            cols.push(("image", SqlValue::Text(v.clone())));
        }
        cols
    }
}
