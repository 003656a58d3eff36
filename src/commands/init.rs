//! `init`: writes `config.json` to the data directory.
//!
//! Values already in the file are kept unless a flag replaces them, so the
//! command can be re-run to change a single setting.

use crate::libs::config::{Config, StorageConfig};
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Interface the server binds to
    #[arg(long)]
    host: Option<String>,

    /// Port the server listens on
    #[arg(short, long)]
    port: Option<u16>,

    /// Reject cross-origin browser requests
    #[arg(long)]
    no_cors: bool,
}

pub fn cmd(args: InitArgs, db: Option<PathBuf>) -> Result<()> {
    let mut config = Config::read()?;

    let mut server = config.server();
    if let Some(host) = args.host {
        server.host = host;
    }
    if let Some(port) = args.port {
        server.port = port;
    }
    if args.no_cors {
        server.cors_allow_any = false;
    }
    config.server = Some(server);

    if let Some(path) = db {
        config.storage = Some(StorageConfig { db_path: Some(path) });
    }

    config.save()?;
    msg_success!(Message::ConfigSaved);

    Ok(())
}
