use async_trait::async_trait;
use eventsite_core::{models::FeatureEvent, AppError};
use sqlx::{PgPool, Postgres};

use super::{resync_identity, RecordRepository};

/// Repository for featured events
#[derive(Clone)]
pub struct PostgresFeatureEventRepository {
    pool: PgPool,
}

impl PostgresFeatureEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository<FeatureEvent> for PostgresFeatureEventRepository {
    #[tracing::instrument(skip(self), fields(db.table = "feature_events", db.operation = "select", db.record_id = %id))]
    async fn find(&self, id: i32) -> Result<Option<FeatureEvent>, AppError> {
        let event = sqlx::query_as::<Postgres, FeatureEvent>(
            "SELECT id, title, description, date_time, location, image, created_at, updated_at FROM feature_events WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    #[tracing::instrument(skip(self), fields(db.table = "feature_events", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<FeatureEvent>, AppError> {
        let events = sqlx::query_as::<Postgres, FeatureEvent>(
            "SELECT id, title, description, date_time, location, image, created_at, updated_at FROM feature_events ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    #[tracing::instrument(skip(self, event), fields(db.table = "feature_events", db.operation = "insert"))]
    async fn insert(&self, event: &FeatureEvent, id: Option<i32>) -> Result<FeatureEvent, AppError> {
        let Some(id) = id else {
            let saved = sqlx::query_as::<Postgres, FeatureEvent>(
                r#"
                INSERT INTO feature_events (title, description, date_time, location, image)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, title, description, date_time, location, image, created_at, updated_at
                "#,
            )
            .bind(&event.title)
            .bind(&event.description)
            .bind(event.date_time)
            .bind(&event.location)
            .bind(&event.image)
            .fetch_one(&self.pool)
            .await?;
            return Ok(saved);
        };

        let saved = sqlx::query_as::<Postgres, FeatureEvent>(
            r#"
            INSERT INTO feature_events (id, title, description, date_time, location, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                date_time = EXCLUDED.date_time,
                location = EXCLUDED.location,
                image = EXCLUDED.image,
                updated_at = NOW()
            RETURNING id, title, description, date_time, location, image, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date_time)
        .bind(&event.location)
        .bind(&event.image)
        .fetch_one(&self.pool)
        .await?;

        resync_identity(&self.pool, "feature_events").await?;

        Ok(saved)
    }

    #[tracing::instrument(skip(self, event), fields(db.table = "feature_events", db.operation = "update", db.record_id = %event.id))]
    async fn save(&self, event: &FeatureEvent) -> Result<FeatureEvent, AppError> {
        let saved = sqlx::query_as::<Postgres, FeatureEvent>(
            r#"
            UPDATE feature_events
            SET title = $2, description = $3, date_time = $4, location = $5, image = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, date_time, location, image, created_at, updated_at
            "#,
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date_time)
        .bind(&event.location)
        .bind(&event.image)
        .fetch_optional(&self.pool)
        .await?;

        saved.ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    #[tracing::instrument(skip(self), fields(db.table = "feature_events", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM feature_events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
