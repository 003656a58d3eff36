use super::resolve_db_path;
use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, needs_migration, table_exists, MigrationManager},
    },
    libs::messages::Message,
    msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: MigrationsCommand,
}

#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    /// Show current database version
    Status,
    /// Show migration history
    History,
}

/// Inspects the schema without applying pending steps.
pub fn cmd(args: MigrationsArgs, db: Option<PathBuf>) -> Result<()> {
    let conn = Db::open_without_migrations(resolve_db_path(db)?)?;

    match args.command {
        MigrationsCommand::Status => {
            let version = if table_exists(&conn, "migrations")? { get_db_version(&conn)? } else { 0 };
            let needs_update = needs_migration(&conn)?;

            msg_print!(Message::DatabaseVersion(version));
            if needs_update {
                msg_info!(Message::DatabaseNeedsUpdate);
            } else {
                msg_info!(Message::DatabaseUpToDate);
            }
        }
        MigrationsCommand::History => {
            msg_print!(Message::MigrationHistory, true);
            if table_exists(&conn, "migrations")? {
                for (version, name, applied_at) in MigrationManager::new().get_migration_history(&conn)? {
                    println!("  v{}: {} (applied: {})", version, name, applied_at);
                }
            }
        }
    }

    Ok(())
}
