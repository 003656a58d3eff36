//! # todo-api - personal todo record service
//!
//! A small HTTP JSON API over a single SQLite table of todo records, plus a
//! command-line interface over the same store.
//!
//! ## Features
//!
//! - **Records**: create, list, update and delete todos with a category,
//!   priority and optional due date
//! - **Queries**: title search, category and priority filters and
//!   whitelisted sorting
//! - **Overdue status**: computed on every read against the local date
//! - **Schema evolution**: versioned, additive migrations applied at startup
//!
//! ## Usage
//!
//! ```rust,no_run
//! use todo_api::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
