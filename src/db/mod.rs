//! Database layer.
//!
//! SQLite persistence for todo records: connection management, the schema
//! migration system and the `todos` table operations.
//!
//! ## Usage
//!
//! ```rust
//! use todo_api::db::{db::Db, todos::Todos};
//! use todo_api::libs::todo::TodoQuery;
//!
//! let todos = Todos::new(Db::open_in_memory()?);
//! assert!(todos.fetch(&TodoQuery::new())?.is_empty());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Indexing
//!
//! `due_date` is indexed; it backs due date ordering and overdue scans.

/// Connection setup and lifecycle.
pub mod db;

/// Versioned, additive schema steps for the `todos` table.
pub mod migrations;

/// Queries and writes against the `todos` table.
pub mod todos;
