use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row};

use super::query_builder::{self, bind_param, SqlValue, Statement, Table};
use super::storage::{Filter, Storage, StorageError};

/// PostgreSQL backend. Every statement returns rows through `row_to_json`.
#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all(&self, stmt: Statement) -> Result<Vec<Value>, StorageError> {
        let mut q = sqlx::query(&stmt.sql);
        for p in &stmt.params {
            q = bind_param(q, p);
        }
        let rows = q.fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| row.try_get::<Value, _>("row").map_err(StorageError::from))
            .collect()
    }

    async fn fetch_optional(&self, stmt: Statement) -> Result<Option<Value>, StorageError> {
        Ok(self.fetch_all(stmt).await?.into_iter().next())
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(())
    }

    async fn select(&self, table: Table, filter: Filter) -> Result<Vec<Value>, StorageError> {
        self.fetch_all(query_builder::select(table, filter)).await
    }

    async fn select_by_id(&self, table: Table, id: i32) -> Result<Option<Value>, StorageError> {
        self.fetch_optional(query_builder::select_by_id(table, id)).await
    }

    async fn insert(
        &self,
        table: Table,
        columns: Vec<(&'static str, SqlValue)>,
    ) -> Result<Value, StorageError> {
        self.fetch_optional(query_builder::insert(table, columns))
            .await?
            .ok_or_else(|| StorageError::Corrupt {
                table: table.name(),
                detail: "insert returned no row".to_string(),
            })
    }

    async fn update(
        &self,
        table: Table,
        id: i32,
        columns: Vec<(&'static str, SqlValue)>,
    ) -> Result<Option<Value>, StorageError> {
        if columns.is_empty() {
            return self.select_by_id(table, id).await;
        }
        self.fetch_optional(query_builder::update(table, id, columns)).await
    }

    async fn delete(&self, table: Table, id: i32) -> Result<bool, StorageError> {
        let stmt = query_builder::delete(table, id);
        let mut q = sqlx::query(&stmt.sql);
        for p in &stmt.params {
            q = bind_param(q, p);
        }
        let result = q.execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
