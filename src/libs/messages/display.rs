//! Display implementation for application messages.
//!
//! All user-facing wording is defined here, in one match, so the HTTP layer,
//! the CLI and the logs all speak with the same text. Validation wording is
//! part of the public API contract: clients compare `error` strings, so those
//! variants must not be reworded casually.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === VALIDATION MESSAGES ===
            Message::TitleRequired => "Title is required".to_string(),
            Message::InvalidPriority => "Priority must be one of: Low, Medium, High".to_string(),
            Message::InvalidDueDateFormat => "Invalid due date format. Please use YYYY-MM-DD format.".to_string(),
            Message::DueDateInPast => "Due date cannot be in the past.".to_string(),
            Message::NoFieldsToUpdate => "At least one of title, category, priority, completed or dueDate is required".to_string(),

            // === TODO MESSAGES ===
            Message::TodoNotFound => "Todo not found".to_string(),
            Message::TodoNotFoundWithId(id) => format!("Todo with ID {} not found.", id),
            Message::TodoCreated(title) => format!("Todo '{}' created", title),
            Message::TodoCompleted(title) => format!("Todo '{}' marked as completed", title),
            Message::TodoDeleted => "Todo deleted successfully".to_string(),
            Message::TodoDeletedWithId(id) => format!("Todo {} deleted", id),
            Message::TodosHeader(count) => format!("Todos ({}):", count),
            Message::NoTodosFound => "No todos found.".to_string(),

            // === HTTP MESSAGES ===
            Message::HealthOk => "TODO API is running".to_string(),
            Message::InvalidRequestBody(reason) => format!("Invalid request body: {}", reason),
            Message::InvalidTodoId(raw) => format!("Invalid todo id: {}", raw),
            Message::RequestFailed(error) => format!("Request failed: {}", error),

            // === SERVER MESSAGES ===
            Message::ServerListening(addr) => format!("Server is running on http://{}", addr),
            Message::ApiAvailableAt(addr) => format!("API endpoints available at http://{}/api", addr),
            Message::ServerShuttingDown => "Shutdown signal received, stopping server...".to_string(),
            Message::ServerStopped => "Server stopped".to_string(),
            Message::ShutdownSignalFailed(error) => format!("Failed to listen for shutdown signal: {}", error),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigInvalidEnvPort(value) => format!("Ignoring invalid PORT value '{}'", value),

            // === DATABASE MESSAGES ===
            Message::DatabaseOpened(path) => format!("Connected to SQLite database at {}", path),
            Message::DatabaseClosed => "Database connection closed".to_string(),
            Message::DatabaseStillInUse => "Database handle is still shared, leaving it to be dropped".to_string(),
            Message::MigrationsTableFailed(error) => format!("Failed to prepare migrations table: {}", error),
            Message::DegradedSchema => "Continuing with the existing todos table; some schema steps are pending".to_string(),
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::MigrationSkipped(version) => format!("Migration v{} left pending, will retry on next start", version),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::ColumnAdded(column) => format!("Column '{}' added to todos table", column),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database schema needs to be updated".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
        };
        write!(f, "{}", text)
    }
}
