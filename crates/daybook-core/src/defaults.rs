//! Centralized default constants for daybook.
//!
//! All crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// SERVER
// =============================================================================

/// Default bind address.
pub const HOST: &str = "0.0.0.0";

/// Default listen port.
pub const PORT: u16 = 3001;

/// Default SQLite database location (created on first start).
pub const DATABASE_URL: &str = "sqlite://daybook.db";

/// Maximum accepted request body (notes carry rich-text HTML).
pub const REQUEST_BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

// =============================================================================
// AUTH
// =============================================================================

/// Session token lifetime in days.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Length of a generated token secret in bytes.
pub const TOKEN_SECRET_BYTES: usize = 32;

// =============================================================================
// DATABASE
// =============================================================================

/// Default maximum number of pooled SQLite connections.
pub const DB_MAX_CONNECTIONS: u32 = 5;

/// How long a writer waits on a locked database before failing.
pub const DB_BUSY_TIMEOUT_SECS: u64 = 5;

/// Maximum ids bound in a single `IN (...)` list.
pub const SQL_IN_CHUNK: usize = 500;
