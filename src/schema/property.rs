use serde::{Serialize, Serializer};
use serde_json::Value;

use super::{Fields, ValidationError};
use crate::database::query_builder::SqlValue;

pub const DEFAULT_SIZE_UNIT: &str = "Guntha";

/// Asking price: either a number or a free-text label such as "Call for Price".
///
/// Always persisted as text. `Numeric(0.0)` is the "price on request"
/// convention and is left for clients to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Price {
    Numeric(f64),
    Label(String),
}

impl Price {
    /// Accept a wire value: a non-negative number, or a non-blank string
    /// classified the same way stored text is.
    pub fn from_input(value: &Value) -> Result<Self, &'static str> {
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(v) if v.is_finite() && v >= 0.0 => Ok(Price::Numeric(v)),
                _ => Err("Price must not be negative"),
            },
            Value::String(s) if s.trim().is_empty() => Err("Price must not be empty"),
            Value::String(s) => Ok(Self::from_text(s)),
            _ => Err("Expected number or string"),
        }
    }

    /// Interpret a stored value. Text that parses as a non-negative number
    /// comes back numeric, anything else is a label exactly as stored.
    pub fn from_stored(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(Price::Numeric),
            Value::String(s) => Some(Self::from_text(s)),
            _ => None,
        }
    }

    pub fn from_text(text: &str) -> Self {
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Price::Numeric(v),
            _ => Price::Label(text.to_string()),
        }
    }

    /// Canonical text form written to the `price` column.
    pub fn to_stored(&self) -> String {
        match self {
            Price::Numeric(v) => format_number(*v),
            Price::Label(s) => s.clone(),
        }
    }
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Price::Numeric(v) if v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 => {
                serializer.serialize_i64(*v as i64)
            }
            Price::Numeric(v) => serializer.serialize_f64(*v),
            Price::Label(s) => serializer.serialize_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertProperty {
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
}

/// Subset of property fields to merge into an existing row.
/// `Some(None)` on a nullable column clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub price_unit: Option<Option<String>>,
    pub location: Option<String>,
    pub size: Option<f64>,
    pub size_unit: Option<String>,
    pub features: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub video_url: Option<Option<String>>,
    pub is_featured: Option<bool>,
    pub property_type: Option<String>,
}

fn read_price(f: &mut Fields<'_>, key: &str) -> Option<Price> {
    match f.raw(key) {
        None => {
            f.issue(key, "Required");
            None
        }
        Some(value) => match Price::from_input(value) {
            Ok(price) => Some(price),
            Err(msg) => {
                f.issue(key, msg);
                None
            }
        },
    }
}

impl InsertProperty {
    pub fn parse(body: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::from_value(body)?;

        let title = f.text("title");
        let description = f.text("description");
        let price = read_price(&mut f, "price");
        let price_unit = f.nullable_text("priceUnit");
        let location = f.text("location");
        let size = f.positive_number("size");
        let size_unit = f.text_or("sizeUnit", DEFAULT_SIZE_UNIT);
        let features = f.string_list("features");
        let images = f.string_list("images");
        let video_url = f.nullable_text("videoUrl");
        let is_featured = f.flag_or("isFeatured", false);
        let property_type = f.text("propertyType");

        f.finish(|| {
            Some(Self {
                title: title?,
                description: description?,
                price: price?,
                price_unit: price_unit?,
                location: location?,
                size: size?,
                size_unit: size_unit?,
                features: features?,
                images: images?,
                video_url: video_url?,
                is_featured: is_featured?,
                property_type: property_type?,
            })
        })
    }

    pub fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("title", SqlValue::Text(self.title.clone())),
            ("description", SqlValue::Text(self.description.clone())),
            ("price", SqlValue::Text(self.price.to_stored())),
            ("price_unit", SqlValue::NullableText(self.price_unit.clone())),
            ("location", SqlValue::Text(self.location.clone())),
            ("size", SqlValue::Float(self.size)),
            ("size_unit", SqlValue::Text(self.size_unit.clone())),
            ("features", SqlValue::TextList(self.features.clone())),
            ("images", SqlValue::TextList(self.images.clone())),
            ("video_url", SqlValue::NullableText(self.video_url.clone())),
            ("is_featured", SqlValue::Bool(self.is_featured)),
            ("property_type", SqlValue::Text(self.property_type.clone())),
        ]
    }
}

impl PropertyPatch {
    pub fn parse(body: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::from_value(body)?;

        let patch = Self {
            title: f.when_present("title", Fields::text),
            description: f.when_present("description", Fields::text),
            price: f.when_present("price", read_price),
            price_unit: f.when_present("priceUnit", Fields::nullable_text),
            location: f.when_present("location", Fields::text),
            size: f.when_present("size", Fields::positive_number),
            size_unit: f.when_present("sizeUnit", |f, k| f.text_or(k, DEFAULT_SIZE_UNIT)),
            features: f.when_present("features", Fields::string_list),
            images: f.when_present("images", Fields::string_list),
            video_url: f.when_present("videoUrl", Fields::nullable_text),
            is_featured: f.when_present("isFeatured", |f, k| match f.raw(k) {
                None => {
                    f.issue(k, "Expected boolean");
                    None
                }
                Some(_) => f.flag_or(k, false),
            }),
            property_type: f.when_present("propertyType", Fields::text),
        };

        f.finish(|| Some(patch))
    }

    pub fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        let mut cols = Vec::new();
        if let Some(v) = &self.title {
            cols.push(("title", SqlValue::Text(v.clone())));
        }
        if let Some(v) = &self.description {
            cols.push(("description", SqlValue::Text(v.clone())));
        }
        if let Some(v) = &self.price {
            cols.push(("price", SqlValue::Text(v.to_stored())));
        }
        if let Some(v) = &self.price_unit {
            cols.push(("price_unit", SqlValue::NullableText(v.clone())));
        }
        if let Some(v) = &self.location {
            cols.push(("location", SqlValue::Text(v.clone())));
        }
        if let Some(v) = self.size {
            cols.push(("size", SqlValue::Float(v)));
        }
        if let Some(v) = &self.size_unit {
            cols.push(("size_unit", SqlValue::Text(v.clone())));
        }
        if let Some(v) = &self.features {
            cols.push(("features", SqlValue::TextList(v.clone())));
        }
        if let Some(v) = &self.images {
            cols.push(("images", SqlValue::TextList(v.clone())));
        }
        if let Some(v) = &self.video_url {
            cols.push(("video_url", SqlValue::NullableText(v.clone())));
        }
        if let Some(v) = self.is_featured {
            cols.push(("is_featured", SqlValue::Bool(v)));
        }
        if let Some(v) = &self.property_type {
            cols.push(("property_type", SqlValue::Text(v.clone())));
        }
        cols
    }
}
