//! # Database Migrations
//!
//! Embedded SQL migrations plus a startup check that the live schema still
//! carries every column the typed rows decode.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  Compare embedded migrations vs _sqlx_migrations                       │
//! │       │                                                                 │
//! │       ├── 001_initial_schema.sql ✓ (already applied)                  │
//! │       └── 002_...                ⬜ (NEW - needs to run)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  verify_schema: PRAGMA table_info(...) for customers/rewards/orders    │
//! │       │                                                                 │
//! │       ├── column missing? → DbError::SchemaMismatch (startup aborts)   │
//! │       ▼                                                                 │
//! │  App continues startup                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. **NEVER** modify existing migrations - always add new ones
//! 3. If a typed row gains a column, add it to [`EXPECTED_COLUMNS`]

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Columns each table must expose for the `FromRow` mappings.
pub const EXPECTED_COLUMNS: &[(&str, &[&str])] = &[
    ("customers", &["id", "name", "email", "points"]),
    ("rewards", &["id", "name", "cost"]),
    (
        "orders",
        &[
            "id",
            "customer_id",
            "reward_id",
            "quantity",
            "points_spent",
            "order_time",
            "status",
        ],
    ),
];

/// Runs all pending database migrations.
///
/// ## Safety
/// - Idempotent: safe to run multiple times
/// - Transactional: each migration runs in a transaction
/// - Ordered: migrations run in filename order (001, 002, ...)
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Checks the live schema against [`EXPECTED_COLUMNS`].
pub async fn verify_schema(pool: &SqlitePool) -> DbResult<()> {
    for (table, columns) in EXPECTED_COLUMNS {
        // Table names are compile-time constants, never user input.
        let present: Vec<String> =
            sqlx::query_scalar(&format!("SELECT name FROM pragma_table_info('{table}')"))
                .fetch_all(pool)
                .await?;

        for column in *columns {
            if !present.iter().any(|name| name == column) {
                return Err(DbError::SchemaMismatch {
                    table: table.to_string(),
                    column: column.to_string(),
                });
            }
        }
        debug!(table = %table, columns = present.len(), "Schema verified");
    }

    Ok(())
}

/// Returns information about migrations.
///
/// ## Returns
/// Tuple of (total_migrations, applied_migrations)
///
/// ## Errors
/// Fails if the migrations table does not exist yet.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;
    let applied = usize::try_from(applied)
        .map_err(|_| DbError::QueryFailed(format!("invalid migration count: {applied}")))?;

    Ok((total, applied))
}
