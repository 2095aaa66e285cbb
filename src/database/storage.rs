//! Backend-neutral row storage.
//!
//! Backends trade in JSON row objects keyed by column name. Typed access goes
//! through [`crate::database::Repository`].

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::query_builder::{SqlValue, Table};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("corrupt row in {table}: {detail}")]
    Corrupt { table: &'static str, detail: String },

    #[error("query failed: {0}")]
    Query(sqlx::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StorageError::Unavailable(err.to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StorageError::Conflict(db.message().to_string())
            }
            _ => StorageError::Query(err),
        }
    }
}

/// Equality filter on a single column.
pub type Filter = Option<(&'static str, SqlValue)>;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Cheap round trip used before list endpoints and by the health check.
    async fn ping(&self) -> Result<(), StorageError>;

    /// Rows matching `filter`, ascending by id.
    async fn select(&self, table: Table, filter: Filter) -> Result<Vec<Value>, StorageError>;

    async fn select_by_id(&self, table: Table, id: i32) -> Result<Option<Value>, StorageError>;

    /// Inserts one row and returns it as stored, id and defaults included.
    async fn insert(
        &self,
        table: Table,
        columns: Vec<(&'static str, SqlValue)>,
    ) -> Result<Value, StorageError>;

    /// `None` when no row has `id`. An empty column list returns the row unchanged.
    async fn update(
        &self,
        table: Table,
        id: i32,
        columns: Vec<(&'static str, SqlValue)>,
    ) -> Result<Option<Value>, StorageError>;

    /// `true` only when a row was removed.
    async fn delete(&self, table: Table, id: i32) -> Result<bool, StorageError>;
}
