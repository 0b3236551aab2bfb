//! Structured logging schema for daybook.
//!
//! Every event carries `subsystem` and `component` fields whose values come
//! from the constants below, so logs can be filtered by them across crates.
//!
//! ## Field names
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `subsystem` | one of the `SUBSYSTEM_*` values |
//! | `component` | one of the `COMPONENT_*` values |
//! | `op` | logical operation, e.g. `insert`, `replace`, `run` |
//! | `user_id`, `note_id`, `todo_id`, `tag_id` | entity ids |
//! | `duration_ms` | wall-clock duration |
//! | `result_count`, `tag_count` | row counts |
//! | `pool_size`, `pool_idle` | connection pool gauges |
//! | `error` | failure message |
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Request failed with a server error, requires operator attention |
//! | WARN  | Recoverable issue, fallback applied (e.g. generated token secret) |
//! | INFO  | Lifecycle events (startup, shutdown), account and tag changes |
//! | DEBUG | Per-request repository operations, row counts |
//! | TRACE | Per-row detail |

// ─── Subsystems ────────────────────────────────────────────────────────────

/// HTTP layer: handlers, extractors, middleware.
pub const SUBSYSTEM_API: &str = "api";

/// SQLite storage: pool, migrations, repositories.
pub const SUBSYSTEM_DATABASE: &str = "database";

// ─── Components ────────────────────────────────────────────────────────────

/// Registration, login and token checks.
pub const COMPONENT_AUTH: &str = "auth";

/// Connection pool lifecycle.
pub const COMPONENT_POOL: &str = "pool";

/// Schema migrations.
pub const COMPONENT_MIGRATIONS: &str = "migrations";

/// Note repository.
pub const COMPONENT_NOTES: &str = "notes";

/// Todo repository.
pub const COMPONENT_TODOS: &str = "todos";

/// Tag repository.
pub const COMPONENT_TAGS: &str = "tags";

/// Tag replacement on save.
pub const COMPONENT_TAGGING: &str = "tagging";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_snake_case() {
        for value in [
            SUBSYSTEM_API,
            SUBSYSTEM_DATABASE,
            COMPONENT_AUTH,
            COMPONENT_POOL,
            COMPONENT_MIGRATIONS,
            COMPONENT_NOTES,
            COMPONENT_TODOS,
            COMPONENT_TAGS,
            COMPONENT_TAGGING,
        ] {
            assert!(value.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }
}
