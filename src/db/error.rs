//! Stage store error types.

use derive_more::{Display, Error};
use kyouen::RegistryError;
use tracing::{instrument, warn};

/// Stage store operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DbOperation {
    /// Opening the SQLite file.
    #[display("open database")]
    Connect,
    /// Applying embedded migrations.
    #[display("migrate schema")]
    Migrate,
    /// Inserting a stage.
    #[display("insert stage")]
    InsertStage,
    /// Looking a stage up by encoding or number.
    #[display("look up stage")]
    LookupStage,
    /// Listing or counting stages.
    #[display("list stages")]
    ListStages,
    /// Writing a clear.
    #[display("record clear")]
    RecordClear,
    /// Reading clears.
    #[display("list clears")]
    ListClears,
}

/// Stage store failure, tagged with the operation and the call site.
#[derive(Debug, Clone, Display, Error)]
#[display("Failed to {}: {} ({}:{})", operation, message, file, line)]
pub struct DbError {
    /// What the store was doing.
    pub operation: DbOperation,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates an error for `operation` at the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(operation: DbOperation, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        warn!(%operation, %message, "Stage store error");
        Self {
            operation,
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Wraps a diesel failure during `operation`.
    #[track_caller]
    pub fn diesel(operation: DbOperation, err: diesel::result::Error) -> Self {
        Self::new(operation, err.to_string())
    }
}

// The registry sees the operation in the message; the location is kept.
impl From<DbError> for RegistryError {
    fn from(err: DbError) -> Self {
        RegistryError {
            message: format!("{}: {}", err.operation, err.message),
            line: err.line,
            file: err.file,
        }
    }
}
