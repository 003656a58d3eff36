use super::{open_service, report};
use crate::libs::messages::Message;
use crate::libs::todo::TodoQuery;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive substring of the title
    #[arg(short, long)]
    search: Option<String>,

    /// Exact category
    #[arg(short, long)]
    category: Option<String>,

    /// Low, Medium or High
    #[arg(short, long)]
    priority: Option<String>,

    /// created_at, title, category, priority, completed or due_date
    #[arg(long)]
    sort_by: Option<String>,

    /// ASC or DESC
    #[arg(long)]
    sort_order: Option<String>,
}

pub fn cmd(args: ListArgs, db: Option<PathBuf>) -> Result<()> {
    let service = open_service(db)?;
    let query = TodoQuery::from_params(args.search, args.category, args.priority, args.sort_by.as_deref(), args.sort_order.as_deref());

    if let Some(todos) = report(service.list(&query))? {
        if todos.is_empty() {
            msg_info!(Message::NoTodosFound);
        } else {
            msg_print!(Message::TodosHeader(todos.len()), true);
            View::todos(&todos)?;
        }
    }

    service.close()
}
