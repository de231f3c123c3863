//! Database migration commands.
//!
//! # Environment Variables
//!
//! - `ORCHARD_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Storefront migrations live in `crates/storefront/migrations/` and are
//! embedded into the binary at compile time.

use std::collections::HashSet;

use secrecy::{ExposeSecret, SecretString};
use sqlx::migrate::{Migrate, Migrator};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, pool::PoolConnection};

static MIGRATOR: Migrator = sqlx::migrate!("../storefront/migrations");

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply all pending storefront migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let pool = connect().await?;

    tracing::info!(
        migrations = MIGRATOR.iter().count(),
        "Running storefront migrations..."
    );
    MIGRATOR.run(&pool).await?;

    tracing::info!("Storefront migrations complete!");
    Ok(())
}

/// Log each embedded migration as applied or pending.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable.
pub async fn status() -> Result<(), MigrationError> {
    let pool = connect().await?;
    let mut conn: PoolConnection<Postgres> = pool.acquire().await?;

    conn.ensure_migrations_table().await?;
    let applied: HashSet<i64> = conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();

    let mut pending = 0_usize;
    for migration in MIGRATOR.iter() {
        if applied.contains(&migration.version) {
            tracing::info!(version = migration.version, description = %migration.description, "applied");
        } else {
            pending += 1;
            tracing::info!(version = migration.version, description = %migration.description, "pending");
        }
    }

    tracing::info!(pending, "Storefront migration status");
    Ok(())
}

async fn connect() -> Result<PgPool, MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = database_url(|key| std::env::var(key).ok())?;

    tracing::info!("Connecting to storefront database...");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url.expose_secret())
        .await?;
    Ok(pool)
}

fn database_url(lookup: impl Fn(&str) -> Option<String>) -> Result<SecretString, MigrationError> {
    lookup("ORCHARD_DATABASE_URL")
        .or_else(|| lookup("DATABASE_URL"))
        .map(SecretString::from)
        .ok_or(MigrationError::MissingEnvVar("ORCHARD_DATABASE_URL"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_embedded_in_order() {
        let versions: Vec<i64> = MIGRATOR.iter().map(|m| m.version).collect();
        assert_eq!(versions, vec![20_260_124_000_001, 20_260_124_000_002]);
    }

    #[test]
    fn test_database_url_prefers_orchard_variable() {
        let url = database_url(|key| match key {
            "ORCHARD_DATABASE_URL" => Some("postgres://primary/db".to_string()),
            "DATABASE_URL" => Some("postgres://fallback/db".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(url.expose_secret(), "postgres://primary/db");
    }

    #[test]
    fn test_database_url_missing() {
        let err = database_url(|_| None).unwrap_err();
        assert!(matches!(err, MigrationError::MissingEnvVar("ORCHARD_DATABASE_URL")));
    }
}
