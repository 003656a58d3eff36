/// Every user-facing text produced by the application.
///
/// Variants carry the parameters they interpolate; the wording itself lives
/// in the `Display` implementation in `display.rs`.
#[derive(Debug, Clone)]
pub enum Message {
    // === VALIDATION MESSAGES ===
    TitleRequired,
    InvalidPriority,
    InvalidDueDateFormat,
    DueDateInPast,
    NoFieldsToUpdate,

    // === TODO MESSAGES ===
    TodoNotFound,
    TodoNotFoundWithId(i64),
    TodoCreated(String),       // title
    TodoCompleted(String),     // title
    TodoDeleted,
    TodoDeletedWithId(i64),
    TodosHeader(usize),        // count
    NoTodosFound,

    // === HTTP MESSAGES ===
    HealthOk,
    InvalidRequestBody(String), // rejection text
    InvalidTodoId(String),      // rejection text
    RequestFailed(String),      // store error

    // === SERVER MESSAGES ===
    ServerListening(String),   // address
    ApiAvailableAt(String),    // address
    ServerShuttingDown,
    ServerStopped,
    ShutdownSignalFailed(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigInvalidEnvPort(String),

    // === DATABASE MESSAGES ===
    DatabaseOpened(String), // path
    DatabaseClosed,
    DatabaseStillInUse,
    MigrationsTableFailed(String),
    DegradedSchema,
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    MigrationSkipped(u32),         // version
    AllMigrationsCompleted,
    ColumnAdded(String),           // column
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
}
