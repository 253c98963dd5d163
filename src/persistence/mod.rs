//! Persistence layer modules.

pub mod audience_codec;
pub mod db;
pub mod notification_repo;
pub mod schema;
pub mod source;

/// Re-export the database pool type for convenience.
pub use sqlx::SqlitePool;
