//! In-process backend for tests and `serve --in-memory`.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::models::row::now_timestamp;
use super::query_builder::{SqlValue, Table};
use super::storage::{Filter, Storage, StorageError};

#[derive(Default)]
struct TableRows {
    next_id: i32,
    rows: BTreeMap<i32, Map<String, Value>>,
}

#[derive(Default)]
pub struct MemoryStorage {
    tables: RwLock<HashMap<Table, TableRows>>,
    offline: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every call fails as if the database were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StorageError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("in-memory store is offline".to_string()));
        }
        Ok(())
    }
}

fn matches(row: &Map<String, Value>, filter: &Filter) -> bool {
    match filter {
        None => true,
        Some((column, value)) => row.get(*column) == Some(&value.to_json()),
    }
}

fn username_taken(rows: &TableRows, columns: &[(&'static str, SqlValue)], except: Option<i32>) -> bool {
    let Some((_, wanted)) = columns.iter().find(|(c, _)| *c == "username") else {
        return false;
    };
    let wanted = wanted.to_json();
    rows.rows
        .iter()
        .any(|(id, row)| Some(*id) != except && row.get("username") == Some(&wanted))
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn ping(&self) -> Result<(), StorageError> {
        self.check_online()
    }

    async fn select(&self, table: Table, filter: Filter) -> Result<Vec<Value>, StorageError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .get(&table)
            .map(|t| {
                t.rows
                    .values()
                    .filter(|row| matches(row, &filter))
                    .map(|row| Value::Object(row.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn select_by_id(&self, table: Table, id: i32) -> Result<Option<Value>, StorageError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .get(&table)
            .and_then(|t| t.rows.get(&id))
            .map(|row| Value::Object(row.clone())))
    }

    async fn insert(
        &self,
        table: Table,
        columns: Vec<(&'static str, SqlValue)>,
    ) -> Result<Value, StorageError> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table).or_default();

        if table == Table::Users && username_taken(rows, &columns, None) {
            return Err(StorageError::Conflict("username already exists".to_string()));
        }

        rows.next_id += 1;
        let id = rows.next_id;

        let mut row = Map::new();
        row.insert("id".to_string(), Value::from(id));
        for (column, value) in &columns {
            row.insert(column.to_string(), value.to_json());
        }
        if table.has_created_at() {
            row.insert("created_at".to_string(), now_timestamp());
        }

        rows.rows.insert(id, row.clone());
        Ok(Value::Object(row))
    }

    async fn update(
        &self,
        table: Table,
        id: i32,
        columns: Vec<(&'static str, SqlValue)>,
    ) -> Result<Option<Value>, StorageError> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(&table) else {
            return Ok(None);
        };

        if table == Table::Users && username_taken(rows, &columns, Some(id)) {
            return Err(StorageError::Conflict("username already exists".to_string()));
        }

        let Some(row) = rows.rows.get_mut(&id) else {
            return Ok(None);
        };
        for (column, value) in &columns {
            row.insert(column.to_string(), value.to_json());
        }
        Ok(Some(Value::Object(row.clone())))
    }

    async fn delete(&self, table: Table, id: i32) -> Result<bool, StorageError> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        Ok(tables
            .get_mut(&table)
            .map(|t| t.rows.remove(&id).is_some())
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(title: &str) -> Vec<(&'static str, SqlValue)> {
        vec![("title", SqlValue::Text(title.to_string()))]
    }

    #[tokio::test]
    async fn ids_are_assigned_in_order_and_never_reused() {
        let store = MemoryStorage::new();
        let a = store.insert(Table::BlogPosts, cols("a")).await.unwrap();
        let b = store.insert(Table::BlogPosts, cols("b")).await.unwrap();
        assert_eq!(a["id"], 1);
        assert_eq!(b["id"], 2);
        assert!(a["created_at"].is_string());

        assert!(store.delete(Table::BlogPosts, 2).await.unwrap());
        assert!(!store.delete(Table::BlogPosts, 2).await.unwrap());

        let c = store.insert(Table::BlogPosts, cols("c")).await.unwrap();
        assert_eq!(c["id"], 3);
    }

    #[tokio::test]
    async fn update_merges_columns() {
        let store = MemoryStorage::new();
        store.insert(Table::BlogPosts, cols("a")).await.unwrap();
        let row = store
            .update(Table::BlogPosts, 1, vec![("author", SqlValue::Text("N".into()))])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row["title"], "a");
        assert_eq!(row["author"], "N");
        assert!(store.update(Table::BlogPosts, 9, cols("x")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn filters_on_column_equality() {
        let store = MemoryStorage::new();
        for featured in [true, false, true] {
            store
                .insert(Table::Properties, vec![("is_featured", SqlValue::Bool(featured))])
                .await
                .unwrap();
        }
        let rows = store
            .select(Table::Properties, Some(("is_featured", SqlValue::Bool(true))))
            .await
            .unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![Value::from(1), Value::from(3)]);
    }

    #[tokio::test]
    async fn usernames_are_unique() {
        let store = MemoryStorage::new();
        let user = || vec![("username", SqlValue::Text("admin".into()))];
        store.insert(Table::Users, user()).await.unwrap();
        let err = store.insert(Table::Users, user()).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn offline_store_is_unavailable() {
        let store = MemoryStorage::new();
        store.set_offline(true);
        assert!(matches!(store.ping().await, Err(StorageError::Unavailable(_))));
        store.set_offline(false);
        assert!(store.ping().await.is_ok());
    }
}
