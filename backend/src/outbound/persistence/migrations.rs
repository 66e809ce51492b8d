//! Embedded Diesel migrations.
//!
//! Migrations ship inside the binary so a deployment needs no external
//! tooling: the server applies pending migrations at startup whenever a
//! database URL is configured.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Migrations compiled in from the crate's `migrations/` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Failures while applying embedded migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not open a connection to the database.
    #[error("failed to connect for migrations: {message}")]
    Connection { message: String },
    /// A migration failed to apply.
    #[error("failed to run migrations: {message}")]
    Migration { message: String },
}

/// Run all pending migrations against the given database.
///
/// Synchronous by design (`diesel_migrations` drives a blocking connection);
/// call from a blocking context during startup.
pub fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let mut conn =
        PgConnection::establish(database_url).map_err(|err| MigrationError::Connection {
            message: err.to_string(),
        })?;

    conn.run_pending_migrations(MIGRATIONS)
        .map(|applied| {
            for migration in applied {
                tracing::info!(%migration, "applied migration");
            }
        })
        .map_err(|err| MigrationError::Migration {
            message: err.to_string(),
        })
}
