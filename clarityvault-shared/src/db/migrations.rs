/// Embedded schema migrations
///
/// The SQL files live in `migrations/` at the workspace root and are compiled
/// into the binary, so a deployed server can bring an empty database up to
/// date on boot.

use sqlx::{migrate::MigrateDatabase, postgres::PgPool, Postgres};
use tracing::{debug, info, warn};

/// Applies every migration that has not run yet
///
/// # Errors
///
/// Returns the sqlx migration error if a script fails or the recorded
/// checksum of an applied script no longer matches the embedded one.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Applying database migrations");

    match sqlx::migrate!("../migrations").run(pool).await {
        Ok(()) => {
            info!("Database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Migration failed");
            Err(e)
        }
    }
}

/// Creates the target database when it is missing (development helper)
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if Postgres::database_exists(database_url).await? {
        debug!("Database already exists");
        return Ok(());
    }

    info!("Database missing, creating it");
    Postgres::create_database(database_url).await
}
