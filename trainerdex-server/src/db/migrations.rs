//! Schema setup for the trainers table

use sqlx::PgPool;

use super::repos::DbError;

/// Run migrations. Idempotent; executed at startup before serving.
///
/// The UNIQUE constraints on name and email are the true enforcement point
/// for the uniqueness invariant; the workflow's count checks only exist to
/// reject duplicates with a friendly error before the write.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS trainers (
            id    SERIAL PRIMARY KEY,
            name  TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Migrations complete");
    Ok(())
}
