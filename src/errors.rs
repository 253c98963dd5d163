//! Error types shared across the crate.

use std::fmt::{Display, Formatter};

/// Shared crate result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// Persistence failure when interacting with `SQLite`.
    Db(String),
    /// Requested notification does not exist.
    NotFound(String),
    /// A persisted audience list column is not a JSON array of strings.
    MalformedEncoding(String),
    /// Recurrence fields form a combination the describer can only render literally.
    InvalidRecurrenceCombination(String),
    /// Lifecycle transition not permitted from the record's current state.
    InvalidTransition(String),
    /// File-system or I/O operation failure.
    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Db(msg) => write!(f, "db: {msg}"),
            Self::NotFound(msg) => write!(f, "not found: {msg}"),
            Self::MalformedEncoding(msg) => write!(f, "malformed encoding: {msg}"),
            Self::InvalidRecurrenceCombination(msg) => {
                write!(f, "invalid recurrence combination: {msg}")
            }
            Self::InvalidTransition(msg) => write!(f, "invalid transition: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Db(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedEncoding(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
