use thiserror::Error;

// === StorageError ===

/// Errors raised by a preference store.
///
/// None of these ever reach the user: controllers log them and fall back to
/// an in-memory preference.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage backend refused access (private browsing, quota, disabled).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    /// The backing database failed.
    #[error("Storage database error: {0}")]
    DatabaseError(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::DatabaseError(e.to_string())
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === BridgeError ===

/// Errors raised while decoding host requests.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A required parameter was absent.
    #[error("missing {0}")]
    MissingParam(&'static str),
    /// A parameter had the wrong shape.
    #[error("invalid {name}: {reason}")]
    InvalidParam { name: &'static str, reason: String },
    /// The method name is not part of the protocol.
    #[error("unknown method: {0}")]
    UnknownMethod(String),
    /// The engine state lock was poisoned by a panicking handler.
    #[error("site state unavailable: {0}")]
    Poisoned(String),
}
