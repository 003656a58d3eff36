//! Core library modules.
//!
//! - **Domain**: the todo model, validation service and error taxonomy
//! - **Infrastructure**: configuration and the per-user data directory
//! - **Presentation**: messages, logging macros and terminal tables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use todo_api::libs::service::TodoService;
//! use todo_api::libs::todo::{NewTodo, TodoQuery};
//!
//! let service = TodoService::open("todos.db")?;
//! service.create(NewTodo::titled("Call the plumber"))?;
//! let todos = service.list(&TodoQuery::new())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod data_storage;
pub mod error;
pub mod messages;
pub mod service;
pub mod todo;
pub mod view;
