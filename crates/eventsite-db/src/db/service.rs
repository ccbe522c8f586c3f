use async_trait::async_trait;
use eventsite_core::{models::Service, AppError};
use sqlx::{PgPool, Postgres};

use super::{resync_identity, RecordRepository};

/// Repository for offered services
#[derive(Clone)]
pub struct PostgresServiceRepository {
    pool: PgPool,
}

impl PostgresServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository<Service> for PostgresServiceRepository {
    #[tracing::instrument(skip(self), fields(db.table = "services", db.operation = "select", db.record_id = %id))]
    async fn find(&self, id: i32) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<Postgres, Service>(
            "SELECT id, title, description, image, created_at, updated_at FROM services WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    #[tracing::instrument(skip(self), fields(db.table = "services", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<Service>, AppError> {
        let rows = sqlx::query_as::<Postgres, Service>(
            "SELECT id, title, description, image, created_at, updated_at FROM services ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self, service), fields(db.table = "services", db.operation = "insert"))]
    async fn insert(&self, service: &Service, id: Option<i32>) -> Result<Service, AppError> {
        let Some(id) = id else {
            let saved = sqlx::query_as::<Postgres, Service>(
                r#"
                INSERT INTO services (title, description, image)
                VALUES ($1, $2, $3)
                RETURNING id, title, description, image, created_at, updated_at
                "#,
            )
            .bind(&service.title)
            .bind(&service.description)
            .bind(&service.image)
            .fetch_one(&self.pool)
            .await?;
            return Ok(saved);
        };

        let saved = sqlx::query_as::<Postgres, Service>(
            r#"
            INSERT INTO services (id, title, description, image)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                image = EXCLUDED.image,
                updated_at = NOW()
            RETURNING id, title, description, image, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&service.title)
        .bind(&service.description)
        .bind(&service.image)
        .fetch_one(&self.pool)
        .await?;

        resync_identity(&self.pool, "services").await?;

        Ok(saved)
    }

    #[tracing::instrument(skip(self, service), fields(db.table = "services", db.operation = "update", db.record_id = %service.id))]
    async fn save(&self, service: &Service) -> Result<Service, AppError> {
        let saved = sqlx::query_as::<Postgres, Service>(
            r#"
            UPDATE services
            SET title = $2, description = $3, image = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, image, created_at, updated_at
            "#,
        )
        .bind(service.id)
        .bind(&service.title)
        .bind(&service.description)
        .bind(&service.image)
        .fetch_optional(&self.pool)
        .await?;

        saved.ok_or_else(|| AppError::NotFound("Service not found".to_string()))
    }

    #[tracing::instrument(skip(self), fields(db.table = "services", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
