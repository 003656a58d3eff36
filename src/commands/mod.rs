//! Command-line interface.
//!
//! `serve` runs the HTTP API; the remaining subcommands work on the same
//! database directly, which is handy for scripting and for inspecting the
//! store without a running server.

pub mod add;
pub mod delete;
pub mod done;
pub mod init;
pub mod list;
pub mod migrations;
pub mod serve;

use crate::libs::config::Config;
use crate::libs::error::{TodoError, TodoResult};
use crate::libs::messages::Message;
use crate::libs::service::TodoService;
use crate::msg_error;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Write the configuration file")]
    Init(init::InitArgs),
    #[command(about = "Run the HTTP API server")]
    Serve(serve::ServeArgs),
    #[command(about = "List todos")]
    List(list::ListArgs),
    #[command(about = "Create a todo")]
    Add(add::AddArgs),
    #[command(about = "Mark a todo as completed")]
    Done(done::DoneArgs),
    #[command(about = "Delete a todo")]
    Delete(delete::DeleteArgs),
    #[command(about = "Inspect database schema versions")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Database file, overriding the configured location
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        let db = cli.db;
        match cli.command {
            Commands::Init(args) => init::cmd(args, db),
            Commands::Serve(args) => serve::cmd(args, db).await,
            Commands::List(args) => list::cmd(args, db),
            Commands::Add(args) => add::cmd(args, db),
            Commands::Done(args) => done::cmd(args, db),
            Commands::Delete(args) => delete::cmd(args, db),
            Commands::Migrations(args) => migrations::cmd(args, db),
        }
    }
}

/// Database path from the `--db` flag, or from configuration.
pub(crate) fn resolve_db_path(db: Option<PathBuf>) -> Result<PathBuf> {
    match db {
        Some(path) => Ok(path),
        None => Config::load()?.db_path(),
    }
}

pub(crate) fn open_service(db: Option<PathBuf>) -> Result<TodoService> {
    TodoService::open(resolve_db_path(db)?)
}

/// Prints rejected input and unknown ids; store failures still propagate.
pub(crate) fn report<T>(result: TodoResult<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(TodoError::Store(e)) => Err(e.into()),
        Err(TodoError::NotFound(id)) => {
            msg_error!(Message::TodoNotFoundWithId(id));
            Ok(None)
        }
        Err(e) => {
            msg_error!(e);
            Ok(None)
        }
    }
}
