use sqlx::PgPool;
use tracing::info;

/// Applies the embedded `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    let migrator = sqlx::migrate!("./migrations");
    migrator.run(pool).await?;
    info!(migrations = migrator.iter().count(), "category schema up to date");
    Ok(())
}
