//! Database schema migration management.
//!
//! The `todos` schema evolves through numbered steps recorded in a
//! `migrations` table. Steps are additive and check-before-change, so they are
//! safe to run on every start, including against databases created before the
//! `migrations` table existed.
//!
//! ## Failure policy
//!
//! - Step 1 creates the base table. If it fails on a database where the table
//!   does not exist yet, startup fails.
//! - Any other failure is logged, the step stays unrecorded and is retried on
//!   the next start; the store keeps working with the columns it has.
//!
//! ## Usage
//!
//! ```rust
//! use todo_api::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open_in_memory()?;
//! init_with_migrations(&mut conn)?;
//! assert_eq!(get_db_version(&conn)?, 5);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info, msg_success, msg_warning};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};
use std::collections::HashSet;

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

pub const TODOS_TABLE: &str = "todos";

const SCHEMA_TODOS: &str = "CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    category TEXT DEFAULT 'General',
    priority TEXT DEFAULT 'Medium',
    completed BOOLEAN DEFAULT 0,
    due_date TEXT,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    /// Creates the base table; its failure is fatal on a fresh database.
    base: bool,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of schema steps and the logic to apply them.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: base table. Fresh databases get every column here, so the
        // column steps below are no-ops for them.
        self.add_migration(1, "create_todos_table", true, |tx| {
            tx.execute(SCHEMA_TODOS, [])?;
            Ok(())
        });

        // Versions 2-4: columns missing from databases written by earlier
        // releases.
        self.add_migration(2, "add_category_column", false, |tx| {
            ensure_column(tx, "category", "TEXT DEFAULT 'General'")
        });
        self.add_migration(3, "add_priority_column", false, |tx| {
            ensure_column(tx, "priority", "TEXT DEFAULT 'Medium'")
        });
        self.add_migration(4, "add_due_date_column", false, |tx| ensure_column(tx, "due_date", "TEXT"));

        // Version 5: overdue checks and due date sorting.
        self.add_migration(5, "add_due_date_index", false, |tx| {
            tx.execute("CREATE INDEX IF NOT EXISTS idx_todos_due_date ON todos(due_date)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, base: bool, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, base, up });
    }

    /// Applies every step that has not been recorded yet, each in its own
    /// transaction.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        let table_existed = table_exists(conn, TODOS_TABLE)?;

        if let Err(e) = conn.execute(MIGRATIONS_TABLE, []) {
            if !table_existed {
                return Err(e.into());
            }
            msg_error!(Message::MigrationsTableFailed(e.to_string()));
            msg_warning!(Message::DegradedSchema);
            return Ok(());
        }

        let applied = self.applied_versions(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| !applied.contains(&m.version)).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_info!(Message::MigrationsFound(pending.len()));

        let mut degraded = false;
        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match apply(conn, migration) {
                Ok(()) => msg_debug!(Message::MigrationCompleted(migration.version)),
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    if migration.base && !table_existed {
                        return Err(e);
                    }
                    msg_warning!(Message::MigrationSkipped(migration.version));
                    degraded = true;
                }
            }
        }

        if degraded {
            msg_warning!(Message::DegradedSchema);
        } else {
            msg_success!(Message::AllMigrationsCompleted);
        }

        Ok(())
    }

    fn applied_versions(&self, conn: &Connection) -> Result<HashSet<u32>> {
        let mut stmt = conn.prepare("SELECT version FROM migrations")?;
        let versions = stmt.query_map([], |row| row.get::<_, u32>(0))?.collect::<Result<HashSet<_>, _>>()?;
        Ok(versions)
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }

    /// Applied steps as (version, name, applied_at), ordered by version.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(conn: &mut Connection, migration: &Migration) -> Result<()> {
    let tx = conn.transaction()?;
    (migration.up)(&tx)?;
    tx.execute(
        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
        params![migration.version, migration.name],
    )?;
    tx.commit()?;
    Ok(())
}

pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        params![table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
        params![table, column],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Adds `column` to the todos table unless it is already there. Existing rows
/// receive the column default.
fn ensure_column(tx: &Transaction, column: &str, definition: &str) -> Result<()> {
    if has_column(tx, TODOS_TABLE, column)? {
        return Ok(());
    }
    tx.execute(&format!("ALTER TABLE {} ADD COLUMN {} {}", TODOS_TABLE, column, definition), [])?;
    msg_info!(Message::ColumnAdded(column.to_string()));
    Ok(())
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().get_current_version(conn)
}

/// True when any registered step is not recorded as applied, including steps
/// that failed earlier and are waiting to be retried.
pub fn needs_migration(conn: &Connection) -> Result<bool> {
    if !table_exists(conn, "migrations")? {
        return Ok(true);
    }
    let manager = MigrationManager::new();
    let applied = manager.applied_versions(conn)?;
    Ok(manager.migrations.iter().any(|m| !applied.contains(&m.version)))
}
