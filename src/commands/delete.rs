use super::{open_service, report};
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    id: i64,
}

pub fn cmd(args: DeleteArgs, db: Option<PathBuf>) -> Result<()> {
    let service = open_service(db)?;

    if report(service.delete(args.id))?.is_some() {
        msg_success!(Message::TodoDeletedWithId(args.id));
    }

    service.close()
}
