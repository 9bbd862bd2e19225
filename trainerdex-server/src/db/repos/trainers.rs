//! Trainer repository
//!
//! One parameterized query per store operation. The two name searches have
//! deliberately different semantics: `find_by_name_starting_with` is a
//! prefix match, `find_by_name` is substring containment and may return
//! several rows even though stored names are unique.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

/// Trainer record from the database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Trainer {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Store operations backing the trainer workflow.
///
/// A trait so the workflow can be exercised against an in-memory double;
/// [`TrainerRepo`] is the Postgres implementation.
#[async_trait]
pub trait TrainerStore: Send + Sync {
    /// All trainers, ordered by id. May be empty.
    async fn find_all(&self) -> Result<Vec<Trainer>, DbError>;

    /// Trainers whose name starts with `prefix` (case-sensitive).
    async fn find_by_name_starting_with(&self, prefix: &str) -> Result<Vec<Trainer>, DbError>;

    /// Trainers whose name contains `name` (case-sensitive).
    async fn find_by_name(&self, name: &str) -> Result<Vec<Trainer>, DbError>;

    /// Trainers with exactly this email.
    async fn find_by_email(&self, email: &str) -> Result<Vec<Trainer>, DbError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Trainer>, DbError>;

    /// Insert a trainer; the database assigns the id.
    async fn insert(&self, name: &str, email: &str) -> Result<Trainer, DbError>;

    /// Returns the number of rows affected (0 when id is absent).
    async fn update(&self, id: i32, name: &str, email: &str) -> Result<u64, DbError>;

    /// Returns the number of rows affected (0 when id is absent).
    async fn delete(&self, id: i32) -> Result<u64, DbError>;

    /// Exact-match count, used for the uniqueness pre-check.
    async fn count_by_name(&self, name: &str) -> Result<i64, DbError>;

    /// Exact-match count, used for the uniqueness pre-check.
    async fn count_by_email(&self, email: &str) -> Result<i64, DbError>;
}

/// Escape LIKE metacharacters so user input matches literally.
fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Trainer repository backed by Postgres
pub struct TrainerRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TrainerRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrainerStore for TrainerRepo<'_> {
    async fn find_all(&self) -> Result<Vec<Trainer>, DbError> {
        let trainers: Vec<Trainer> =
            sqlx::query_as("SELECT id, name, email FROM trainers ORDER BY id")
                .fetch_all(self.pool)
                .await?;

        Ok(trainers)
    }

    async fn find_by_name_starting_with(&self, prefix: &str) -> Result<Vec<Trainer>, DbError> {
        let pattern = format!("{}%", escape_like(prefix));
        let trainers: Vec<Trainer> =
            sqlx::query_as("SELECT id, name, email FROM trainers WHERE name LIKE $1 ORDER BY id")
                .bind(pattern)
                .fetch_all(self.pool)
                .await?;

        Ok(trainers)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Trainer>, DbError> {
        let pattern = format!("%{}%", escape_like(name));
        let trainers: Vec<Trainer> =
            sqlx::query_as("SELECT id, name, email FROM trainers WHERE name LIKE $1 ORDER BY id")
                .bind(pattern)
                .fetch_all(self.pool)
                .await?;

        Ok(trainers)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Trainer>, DbError> {
        let trainers: Vec<Trainer> =
            sqlx::query_as("SELECT id, name, email FROM trainers WHERE email = $1 ORDER BY id")
                .bind(email)
                .fetch_all(self.pool)
                .await?;

        Ok(trainers)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Trainer>, DbError> {
        let trainer: Option<Trainer> =
            sqlx::query_as("SELECT id, name, email FROM trainers WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(trainer)
    }

    async fn insert(&self, name: &str, email: &str) -> Result<Trainer, DbError> {
        let trainer: Trainer = sqlx::query_as(
            "INSERT INTO trainers (name, email) VALUES ($1, $2) RETURNING id, name, email",
        )
        .bind(name)
        .bind(email)
        .fetch_one(self.pool)
        .await?;

        Ok(trainer)
    }

    async fn update(&self, id: i32, name: &str, email: &str) -> Result<u64, DbError> {
        let result = sqlx::query("UPDATE trainers SET name = $2, email = $3 WHERE id = $1")
            .bind(id)
            .bind(name)
            .bind(email)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM trainers WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn count_by_name(&self, name: &str) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trainers WHERE name = $1")
            .bind(name)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    async fn count_by_email(&self, email: &str) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trainers WHERE email = $1")
            .bind(email)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
