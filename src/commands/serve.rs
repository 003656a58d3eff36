//! `serve`: runs the HTTP API until Ctrl-C.
//!
//! Host and port come from configuration unless overridden here. On shutdown
//! in-flight requests are allowed to finish and the store is closed
//! explicitly.

use super::resolve_db_path;
use crate::api::create_router_with_cors;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::service::TodoService;
use crate::{msg_error, msg_info, msg_success};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tokio::net::TcpListener;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

pub async fn cmd(args: ServeArgs, db: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let mut server = config.server();
    if let Some(host) = args.host {
        server.host = host;
    }
    if let Some(port) = args.port {
        server.port = port;
    }

    let db_path = resolve_db_path(db)?;
    let service = TodoService::open(&db_path)?;
    msg_info!(Message::DatabaseOpened(db_path.display().to_string()));

    let app = create_router_with_cors(service.clone(), server.cors_allow_any);
    let listener = TcpListener::bind(server.addr()).await?;
    let addr = listener.local_addr()?;
    msg_success!(Message::ServerListening(addr.to_string()));
    msg_info!(Message::ApiAvailableAt(addr.to_string()));

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    service.close()?;
    msg_info!(Message::ServerStopped);
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => msg_info!(Message::ServerShuttingDown),
        Err(e) => {
            // Without a signal handler the server runs until killed.
            msg_error!(Message::ShutdownSignalFailed(e.to_string()));
            std::future::pending::<()>().await;
        }
    }
}
