use super::migrations::init_with_migrations;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error_anyhow};
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "todos.db";

/// Owned SQLite connection with the schema brought up to date.
///
/// A `Db` is opened once at process start and handed to the store; it is
/// closed explicitly through [`Db::close`] so close errors are not swallowed.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens (creating if needed) the database file and applies pending
    /// schema steps.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db> {
        let mut conn = Self::open_without_migrations(&path)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    pub fn open_in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        set_pragmas(&conn)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Opens a raw connection without touching the schema. Used by the
    /// migration inspection commands and by tests that seed legacy layouts.
    pub fn open_without_migrations<P: AsRef<Path>>(path: P) -> Result<Connection> {
        let conn = Connection::open(path)?;
        set_pragmas(&conn)?;
        Ok(conn)
    }

    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| msg_error_anyhow!(e))?;
        msg_debug!(Message::DatabaseClosed);
        Ok(())
    }
}

fn set_pragmas(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA busy_timeout = 5000;",
    )?;
    Ok(())
}
