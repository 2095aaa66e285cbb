use serde_json::Value;

use super::{Fields, ValidationError};
use crate::database::query_builder::SqlValue;

#[derive(Debug, Clone, PartialEq)]
pub struct InsertBlogPost {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
}

const FIELDS: [&str; 5] = ["title", "content", "excerpt", "author", "image"];

impl InsertBlogPost {
    pub fn parse(body: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::from_value(body)?;
        let [title, content, excerpt, author, image] = FIELDS.map(|key| f.text(key));

        f.finish(|| {
            Some(Self {
                title: title?,
                content: content?,
                excerpt: excerpt?,
                author: author?,
                image: image?,
            })
        })
    }

    pub fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("title", SqlValue::Text(self.title.clone())),
            ("content", SqlValue::Text(self.content.clone())),
            ("excerpt", SqlValue::Text(self.excerpt.clone())),
            ("author", SqlValue::Text(self.author.clone())),
            ("image", SqlValue::Text(self.image.clone())),
        ]
    }
}

impl BlogPostPatch {
    pub fn parse(body: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::from_value(body)?;
        let [title, content, excerpt, author, image] =
            FIELDS.map(|key| f.when_present(key, Fields::text));

        f.finish(|| {
            Some(Self {
                title,
                content,
                excerpt,
                author,
                image,
            })
        })
    }

    pub fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        let values = [
            &self.title,
            &self.content,
            &self.excerpt,
            &self.author,
            &self.image,
        ];
        FIELDS
            .iter()
            .zip(values)
            .filter_map(|(key, value)| value.as_ref().map(|v| (*key, SqlValue::Text(v.clone()))))
            .collect()
    }
}
