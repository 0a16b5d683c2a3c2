//! Error types for the workout log
//!
//! Nothing here is fatal: every failure is handed back to the caller (the
//! map/UI layer), which decides how to tell the user.

/// Rejected form input. Raised before any record is constructed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("Unknown workout type: {0:?}")]
    UnknownKind(String),

    #[error("{field} is not a number: {raw:?}")]
    NotANumber { field: &'static str, raw: String },

    #[error("{field} has to be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} cannot be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("Invalid map position: [{lat}, {lng}]")]
    InvalidCoords { lat: f64, lng: f64 },
}

/// A stored blob exists but cannot be turned back into workouts.
///
/// The whole batch is rejected; no partially restored collection is
/// ever returned.
#[derive(Debug, thiserror::Error)]
pub enum CorruptStorage {
    #[error("Stored workouts could not be parsed as a JSON array: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Entry {index} does not have the shape of a workout: {source}")]
    Shape {
        index: usize,
        source: serde_json::Error,
    },

    #[error("Entry {index} has unrecognized type {kind:?}")]
    UnknownType { index: usize, kind: String },

    #[error("Entry {index} is missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("Entry {index} has invalid `{field}`: {value}")]
    InvalidValue {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Entry {index} has unreadable date {raw:?}")]
    InvalidDate { index: usize, raw: String },
}

/// Failure talking to the key-value store, or reading what it holds.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage read failed: {0}")]
    Read(String),

    #[error("Storage write failed: {0}")]
    Write(String),

    #[error("Could not encode workouts: {0}")]
    Encode(serde_json::Error),

    #[error(transparent)]
    Corrupt(#[from] CorruptStorage),
}

/// Errors surfaced by [`crate::WorkoutLog`] operations.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("No workout with id {0:?}")]
    NotFound(String),
}

impl StorageError {
    /// True when the stored data itself is bad, as opposed to the store
    /// being unreachable.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StorageError::Corrupt(_))
    }
}

/// Result type alias for logbook operations
pub type Result<T> = std::result::Result<T, LogError>;
