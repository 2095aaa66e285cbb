use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use super::models::{BlogPost, Message, Property, Testimonial, User};
use super::query_builder::{SqlValue, Table};
use super::storage::{Filter, Storage, StorageError};

/// A stored record type with a fixed home table.
pub trait Entity: Sized {
    const TABLE: Table;

    fn from_row(row: &Value) -> Result<Self, StorageError>;
}

macro_rules! entity {
    ($ty:ty, $table:expr) => {
        impl Entity for $ty {
            const TABLE: Table = $table;

            fn from_row(row: &Value) -> Result<Self, StorageError> {
                <$ty>::from_row(row)
            }
        }
    };
}

entity!(User, Table::Users);
entity!(Property, Table::Properties);
entity!(BlogPost, Table::BlogPosts);
entity!(Message, Table::Messages);
entity!(Testimonial, Table::Testimonials);

/// Typed access to one table over any [`Storage`] backend.
pub struct Repository<T> {
    storage: Arc<dyn Storage>,
    _phantom: PhantomData<T>,
}

impl<T: Entity> Repository<T> {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            _phantom: PhantomData,
        }
    }

    pub async fn select_all(&self) -> Result<Vec<T>, StorageError> {
        self.select_where(None).await
    }

    pub async fn select_where(&self, filter: Filter) -> Result<Vec<T>, StorageError> {
        self.storage
            .select(T::TABLE, filter)
            .await?
            .iter()
            .map(T::from_row)
            .collect()
    }

    pub async fn select_one(&self, id: i32) -> Result<Option<T>, StorageError> {
        self.storage
            .select_by_id(T::TABLE, id)
            .await?
            .as_ref()
            .map(T::from_row)
            .transpose()
    }

    pub async fn create(&self, columns: Vec<(&'static str, SqlValue)>) -> Result<T, StorageError> {
        let row = self.storage.insert(T::TABLE, columns).await?;
        T::from_row(&row)
    }

    pub async fn update(
        &self,
        id: i32,
        columns: Vec<(&'static str, SqlValue)>,
    ) -> Result<Option<T>, StorageError> {
        self.storage
            .update(T::TABLE, id, columns)
            .await?
            .as_ref()
            .map(T::from_row)
            .transpose()
    }

    pub async fn delete(&self, id: i32) -> Result<bool, StorageError> {
        self.storage.delete(T::TABLE, id).await
    }
}

/// Which slice of the catalogue `GET /properties` returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyFilter {
    All,
    ByType(String),
    Featured,
}

impl PropertyFilter {
    /// `type` wins over `featured`; only the literal `"true"` selects featured.
    pub fn from_query(property_type: Option<&str>, featured: Option<&str>) -> Self {
        match (property_type, featured) {
            (Some(t), _) => PropertyFilter::ByType(t.to_string()),
            (None, Some("true")) => PropertyFilter::Featured,
            _ => PropertyFilter::All,
        }
    }

    fn to_filter(&self) -> Filter {
        match self {
            PropertyFilter::All => None,
            PropertyFilter::ByType(t) => Some(("property_type", SqlValue::Text(t.clone()))),
            PropertyFilter::Featured => Some(("is_featured", SqlValue::Bool(true))),
        }
    }
}

impl Repository<Property> {
    pub async fn select_filtered(&self, filter: &PropertyFilter) -> Result<Vec<Property>, StorageError> {
        self.select_where(filter.to_filter()).await
    }
}

impl Repository<User> {
    pub async fn select_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        Ok(self
            .select_where(Some(("username", SqlValue::Text(username.to_string()))))
            .await?
            .into_iter()
            .next())
    }
}
