//! Read-side normalisation of stored rows.
//!
//! Rows arrive as JSON objects keyed by column name, whichever backend
//! produced them. Columns the store may leave empty are coerced here so that
//! every entity leaving the storage layer is fully populated.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::database::query_builder::Table;
use crate::database::StorageError;
use crate::schema::split_list;

pub struct RowReader<'a> {
    table: Table,
    row: &'a Map<String, Value>,
}

impl<'a> RowReader<'a> {
    pub fn new(table: Table, row: &'a Value) -> Result<Self, StorageError> {
        match row {
            Value::Object(row) => Ok(Self { table, row }),
            other => Err(StorageError::Corrupt {
                table: table.name(),
                detail: format!("expected a row object, got {}", other),
            }),
        }
    }

    fn corrupt(&self, column: &str, problem: &str) -> StorageError {
        StorageError::Corrupt {
            table: self.table.name(),
            detail: format!("{} {}", column, problem),
        }
    }

    fn get(&self, column: &str) -> Option<&'a Value> {
        self.row.get(column).filter(|v| !v.is_null())
    }

    pub fn id(&self) -> Result<i32, StorageError> {
        self.get("id")
            .and_then(Value::as_i64)
            .and_then(|id| i32::try_from(id).ok())
            .ok_or_else(|| self.corrupt("id", "is missing or not an integer"))
    }

    pub fn text(&self, column: &str) -> Result<String, StorageError> {
        match self.get(column) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Ok(other.to_string()),
            None => Err(self.corrupt(column, "is missing")),
        }
    }

    pub fn text_or(&self, column: &str, default: &str) -> String {
        match self.get(column) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => default.to_string(),
        }
    }

    pub fn nullable_text(&self, column: &str) -> Option<String> {
        match self.get(column) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    pub fn number(&self, column: &str) -> Result<f64, StorageError> {
        match self.get(column) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| self.corrupt(column, "is missing or not numeric"))
    }

    pub fn integer(&self, column: &str) -> Result<i32, StorageError> {
        self.number(column).map(|n| n.round() as i32)
    }

    /// Absent lists read as empty. Some stores hand arrays back as a
    /// Postgres literal (`{a,b}`) or a comma-joined string.
    pub fn text_list(&self, column: &str) -> Vec<String> {
        match self.get(column) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect(),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                let inner = trimmed
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
                    .unwrap_or(trimmed);
                split_list(inner)
                    .into_iter()
                    .map(|item| item.trim_matches('"').to_string())
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    /// Strict boolean from native, 0/1 or "true"/"false" storage.
    pub fn flag(&self, column: &str) -> bool {
        match self.get(column) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
            Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "t" | "1"),
            _ => false,
        }
    }

    /// Timestamps absent from the row default to now.
    pub fn timestamp(&self, column: &str) -> DateTime<Utc> {
        self.get(column)
            .and_then(Value::as_str)
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now)
    }

    pub fn raw(&self, column: &str) -> Option<&'a Value> {
        self.get(column)
    }
}

/// Accepts RFC 3339 and the zone-less form `row_to_json` emits for
/// `TIMESTAMP` columns, which are taken to be UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Storage form of a fresh `created_at`, matching what Postgres returns.
pub fn now_timestamp() -> Value {
    Value::String(Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string())
}
