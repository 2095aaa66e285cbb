use serde_json::{json, Value};
use sqlx::{self, postgres::PgArguments};

/// Tables owned by the service. Identifiers only ever come from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Properties,
    BlogPosts,
    Messages,
    Testimonials,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Properties => "properties",
            Table::BlogPosts => "blog_posts",
            Table::Messages => "messages",
            Table::Testimonials => "testimonials",
        }
    }

    /// Whether rows carry a server-assigned `created_at`.
    pub fn has_created_at(self) -> bool {
        matches!(self, Table::Properties | Table::BlogPosts | Table::Messages)
    }
}

/// A typed bind parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    NullableText(Option<String>),
    Float(f64),
    Int(i32),
    Bool(bool),
    TextList(Vec<String>),
}

impl SqlValue {
    /// Same value in the shape `row_to_json` would hand back.
    pub fn to_json(&self) -> Value {
        match self {
            SqlValue::Text(s) => json!(s),
            SqlValue::NullableText(s) => json!(s),
            SqlValue::Float(f) => json!(f),
            SqlValue::Int(i) => json!(i),
            SqlValue::Bool(b) => json!(b),
            SqlValue::TextList(items) => json!(items),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// `SELECT` returning each row as one JSON column named `row`, ordered by id.
pub fn select(table: Table, filter: Option<(&str, SqlValue)>) -> Statement {
    let mut params = Vec::new();
    let mut inner = format!("SELECT * FROM {}", quote(table.name()));
    if let Some((column, value)) = filter {
        inner.push_str(&format!(" WHERE {} = $1", quote(column)));
        params.push(value);
    }
    inner.push_str(" ORDER BY \"id\"");

    Statement {
        sql: format!("SELECT row_to_json(t) AS row FROM ({}) t", inner),
        params,
    }
}

pub fn select_by_id(table: Table, id: i32) -> Statement {
    select(table, Some(("id", SqlValue::Int(id))))
}

pub fn insert(table: Table, columns: Vec<(&'static str, SqlValue)>) -> Statement {
    let names: Vec<String> = columns.iter().map(|(c, _)| quote(c)).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();

    Statement {
        sql: format!(
            "WITH t AS (INSERT INTO {} ({}) VALUES ({}) RETURNING *) SELECT row_to_json(t) AS row FROM t",
            quote(table.name()),
            names.join(", "),
            placeholders.join(", ")
        ),
        params: columns.into_iter().map(|(_, v)| v).collect(),
    }
}

/// Partial update of one row. Callers must pass at least one column.
pub fn update(table: Table, id: i32, columns: Vec<(&'static str, SqlValue)>) -> Statement {
    let assignments: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, (c, _))| format!("{} = ${}", quote(c), i + 1))
        .collect();
    let id_placeholder = columns.len() + 1;

    let mut params: Vec<SqlValue> = columns.into_iter().map(|(_, v)| v).collect();
    params.push(SqlValue::Int(id));

    Statement {
        sql: format!(
            "WITH t AS (UPDATE {} SET {} WHERE \"id\" = ${} RETURNING *) SELECT row_to_json(t) AS row FROM t",
            quote(table.name()),
            assignments.join(", "),
            id_placeholder
        ),
        params,
    }
}

pub fn delete(table: Table, id: i32) -> Statement {
    Statement {
        sql: format!("DELETE FROM {} WHERE \"id\" = $1", quote(table.name())),
        params: vec![SqlValue::Int(id)],
    }
}

pub fn bind_param<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q SqlValue,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        SqlValue::Text(s) => q.bind(s.as_str()),
        SqlValue::NullableText(s) => q.bind(s.as_deref()),
        SqlValue::Float(f) => q.bind(*f),
        SqlValue::Int(i) => q.bind(*i),
        SqlValue::Bool(b) => q.bind(*b),
        SqlValue::TextList(items) => q.bind(items.as_slice()),
    }
}
