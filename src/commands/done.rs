use super::{open_service, report};
use crate::libs::messages::Message;
use crate::libs::todo::TodoChanges;
use crate::msg_success;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DoneArgs {
    id: i64,
}

pub fn cmd(args: DoneArgs, db: Option<PathBuf>) -> Result<()> {
    let service = open_service(db)?;
    let changes = TodoChanges {
        completed: Some(true),
        ..Default::default()
    };

    if let Some(updated) = report(service.update(args.id, changes))? {
        msg_success!(Message::TodoCompleted(updated.todo.title));
    }

    service.close()
}
