use super::{open_service, report};
use crate::libs::messages::Message;
use crate::libs::todo::NewTodo;
use crate::msg_success;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AddArgs {
    title: String,

    /// Defaults to General
    #[arg(short, long)]
    category: Option<String>,

    /// Low, Medium or High; defaults to Medium
    #[arg(short, long)]
    priority: Option<String>,

    /// Due date as YYYY-MM-DD
    #[arg(short, long)]
    due: Option<String>,
}

pub fn cmd(args: AddArgs, db: Option<PathBuf>) -> Result<()> {
    let service = open_service(db)?;
    let input = NewTodo {
        title: Some(args.title),
        category: args.category,
        priority: args.priority,
        due_date: args.due,
    };

    if let Some(created) = report(service.create(input))? {
        msg_success!(Message::TodoCreated(format!("#{} {}", created.todo.id, created.todo.title)));
    }

    service.close()
}
