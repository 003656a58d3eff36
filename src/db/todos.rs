//! Todo persistence.
//!
//! `Todos` owns the shared connection and translates [`TodoQuery`],
//! [`TodoDraft`] and [`TodoPatch`] into parameterized SQL. Only identifiers
//! from closed enums (`SortField`, `SortOrder`, `TodoField`) are ever
//! formatted into statements; all values are bound parameters.
//!
//! ```rust
//! use todo_api::db::{db::Db, todos::Todos};
//! use todo_api::libs::todo::{Priority, TodoDraft, TodoQuery};
//! use chrono::Utc;
//!
//! let todos = Todos::new(Db::open_in_memory()?);
//! let draft = TodoDraft { title: "Buy milk".into(), category: "General".into(), priority: Priority::Medium, due_date: None };
//! let id = todos.insert(&draft, Utc::now())?;
//! assert_eq!(todos.fetch(&TodoQuery::new())?[0].id, id);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::db::Db;
use crate::libs::messages::Message;
use crate::libs::todo::{Priority, Todo, TodoDraft, TodoPatch, TodoQuery, DEFAULT_CATEGORY};
use crate::msg_warning;
use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};
use std::path::Path;
use std::sync::Arc;

const INSERT_TODO: &str =
    "INSERT INTO todos (title, category, priority, completed, due_date, created_at, updated_at) VALUES (?1, ?2, ?3, 0, ?4, ?5, ?5)";
const SELECT_TODOS: &str = "SELECT id, title, category, priority, completed, due_date, created_at, updated_at FROM todos";
const WHERE_ID: &str = "WHERE id = ?1";
const DELETE_TODO: &str = "DELETE FROM todos WHERE id = ?1";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f+00:00";

/// Shared handle to the todos table.
///
/// Cloning is cheap; all clones use the same connection, and SQLite calls are
/// serialized through the mutex.
#[derive(Clone)]
pub struct Todos {
    conn: Arc<Mutex<Db>>,
}

impl Todos {
    pub fn new(db: Db) -> Self {
        Todos { conn: Arc::new(Mutex::new(db)) }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(Db::open(path)?))
    }

    pub fn insert(&self, draft: &TodoDraft, now: DateTime<Utc>) -> rusqlite::Result<i64> {
        let db = self.conn.lock();
        db.conn.execute(
            INSERT_TODO,
            params![draft.title, draft.category, draft.priority, draft.due_date, timestamp(now)],
        )?;

        Ok(db.conn.last_insert_rowid())
    }

    pub fn get_by_id(&self, id: i64) -> rusqlite::Result<Option<Todo>> {
        let db = self.conn.lock();
        db.conn
            .query_row(&format!("{} {}", SELECT_TODOS, WHERE_ID), params![id], row_to_todo)
            .optional()
    }

    /// Returns all todos matching the query filters, in the requested order.
    /// Rows with equal sort keys are ordered by id in the same direction.
    pub fn fetch(&self, query: &TodoQuery) -> rusqlite::Result<Vec<Todo>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(search) = &query.search {
            clauses.push("title LIKE ? ESCAPE '\\'");
            values.push(Value::Text(format!("%{}%", escape_like(search))));
        }
        if let Some(category) = &query.category {
            clauses.push("category = ?");
            values.push(Value::Text(category.clone()));
        }
        if let Some(priority) = &query.priority {
            clauses.push("priority = ?");
            values.push(Value::Text(priority.clone()));
        }

        let mut sql = SELECT_TODOS.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        let direction = query.sort_order.as_sql();
        sql.push_str(&format!(" ORDER BY {} {}, id {}", query.sort_by.order_expr(), direction, direction));

        let db = self.conn.lock();
        let mut stmt = db.conn.prepare(&sql)?;
        let todo_iter = stmt.query_map(params_from_iter(values.iter()), row_to_todo)?;

        let mut todos = Vec::new();
        for todo in todo_iter {
            todos.push(todo?);
        }

        Ok(todos)
    }

    /// Writes the patched fields and refreshes `updated_at`. Returns the number
    /// of rows affected, zero when no todo has this id.
    pub fn update(&self, id: i64, patch: &TodoPatch, now: DateTime<Utc>) -> rusqlite::Result<usize> {
        let mut assignments: Vec<String> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        for (field, value) in patch.iter() {
            assignments.push(format!("{} = ?", field.column()));
            values.push(value.clone());
        }
        assignments.push("updated_at = ?".to_string());
        values.push(Value::Text(timestamp(now)));
        values.push(Value::Integer(id));

        let sql = format!("UPDATE todos SET {} WHERE id = ?", assignments.join(", "));

        let db = self.conn.lock();
        db.conn.execute(&sql, params_from_iter(values.iter()))
    }

    pub fn delete(&self, id: i64) -> rusqlite::Result<usize> {
        let db = self.conn.lock();
        db.conn.execute(DELETE_TODO, params![id])
    }

    /// Closes the connection when this is the last handle. Other live handles
    /// keep it open and it is released when the last of them is dropped.
    pub fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.conn) {
            Ok(db) => db.into_inner().close(),
            Err(_) => {
                msg_warning!(Message::DatabaseStillInUse);
                Ok(())
            }
        }
    }
}

fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get::<_, Option<String>>(2)?.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        priority: row.get::<_, Option<Priority>>(3)?.unwrap_or_default(),
        completed: row.get::<_, Option<bool>>(4)?.unwrap_or(false),
        due_date: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Timestamps are stored as UTC text that sorts chronologically.
fn timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50% off_now"), "50\\% off\\_now");
        assert_eq!(escape_like("plain"), "plain");
    }
}
