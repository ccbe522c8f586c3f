use async_trait::async_trait;
use eventsite_core::{models::Faq, AppError};
use sqlx::{PgPool, Postgres};

use super::{resync_identity, RecordRepository};

/// Repository for FAQ entries
#[derive(Clone)]
pub struct PostgresFaqRepository {
    pool: PgPool,
}

impl PostgresFaqRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository<Faq> for PostgresFaqRepository {
    #[tracing::instrument(skip(self), fields(db.table = "faqs", db.operation = "select", db.record_id = %id))]
    async fn find(&self, id: i32) -> Result<Option<Faq>, AppError> {
        let faq = sqlx::query_as::<Postgres, Faq>(
            "SELECT id, question, answer, created_at, updated_at FROM faqs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(faq)
    }

    #[tracing::instrument(skip(self), fields(db.table = "faqs", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<Faq>, AppError> {
        let rows = sqlx::query_as::<Postgres, Faq>(
            "SELECT id, question, answer, created_at, updated_at FROM faqs ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self, faq), fields(db.table = "faqs", db.operation = "insert"))]
    async fn insert(&self, faq: &Faq, id: Option<i32>) -> Result<Faq, AppError> {
        let Some(id) = id else {
            let saved = sqlx::query_as::<Postgres, Faq>(
                r#"
                INSERT INTO faqs (question, answer)
                VALUES ($1, $2)
                RETURNING id, question, answer, created_at, updated_at
                "#,
            )
            .bind(&faq.question)
            .bind(&faq.answer)
            .fetch_one(&self.pool)
            .await?;
            return Ok(saved);
        };

        let saved = sqlx::query_as::<Postgres, Faq>(
            r#"
            INSERT INTO faqs (id, question, answer)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                question = EXCLUDED.question,
                answer = EXCLUDED.answer,
                updated_at = NOW()
            RETURNING id, question, answer, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&faq.question)
        .bind(&faq.answer)
        .fetch_one(&self.pool)
        .await?;

        resync_identity(&self.pool, "faqs").await?;

        Ok(saved)
    }

    #[tracing::instrument(skip(self, faq), fields(db.table = "faqs", db.operation = "update", db.record_id = %faq.id))]
    async fn save(&self, faq: &Faq) -> Result<Faq, AppError> {
        let saved = sqlx::query_as::<Postgres, Faq>(
            r#"
            UPDATE faqs
            SET question = $2, answer = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, question, answer, created_at, updated_at
            "#,
        )
        .bind(faq.id)
        .bind(&faq.question)
        .bind(&faq.answer)
        .fetch_optional(&self.pool)
        .await?;

        saved.ok_or_else(|| AppError::NotFound("FAQ not found".to_string()))
    }

    #[tracing::instrument(skip(self), fields(db.table = "faqs", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM faqs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
