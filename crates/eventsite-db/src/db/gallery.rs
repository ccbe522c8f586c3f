use async_trait::async_trait;
use eventsite_core::{models::Gallery, AppError};
use sqlx::{PgPool, Postgres};

use super::{resync_identity, RecordRepository};

/// Repository for gallery entries
#[derive(Clone)]
pub struct PostgresGalleryRepository {
    pool: PgPool,
}

impl PostgresGalleryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository<Gallery> for PostgresGalleryRepository {
    #[tracing::instrument(skip(self), fields(db.table = "galleries", db.operation = "select", db.record_id = %id))]
    async fn find(&self, id: i32) -> Result<Option<Gallery>, AppError> {
        let gallery = sqlx::query_as::<Postgres, Gallery>(
            "SELECT id, title, image1, image2, image3, image4, video, created_at, updated_at FROM galleries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(gallery)
    }

    #[tracing::instrument(skip(self), fields(db.table = "galleries", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<Gallery>, AppError> {
        let rows = sqlx::query_as::<Postgres, Gallery>(
            "SELECT id, title, image1, image2, image3, image4, video, created_at, updated_at FROM galleries ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self, gallery), fields(db.table = "galleries", db.operation = "insert"))]
    async fn insert(&self, gallery: &Gallery, id: Option<i32>) -> Result<Gallery, AppError> {
        let Some(id) = id else {
            let saved = sqlx::query_as::<Postgres, Gallery>(
                r#"
                INSERT INTO galleries (title, image1, image2, image3, image4, video)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, title, image1, image2, image3, image4, video, created_at, updated_at
                "#,
            )
            .bind(&gallery.title)
            .bind(&gallery.image1)
            .bind(&gallery.image2)
            .bind(&gallery.image3)
            .bind(&gallery.image4)
            .bind(&gallery.video)
            .fetch_one(&self.pool)
            .await?;
            return Ok(saved);
        };

        let saved = sqlx::query_as::<Postgres, Gallery>(
            r#"
            INSERT INTO galleries (id, title, image1, image2, image3, image4, video)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                image1 = EXCLUDED.image1,
                image2 = EXCLUDED.image2,
                image3 = EXCLUDED.image3,
                image4 = EXCLUDED.image4,
                video = EXCLUDED.video,
                updated_at = NOW()
            RETURNING id, title, image1, image2, image3, image4, video, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&gallery.title)
        .bind(&gallery.image1)
        .bind(&gallery.image2)
        .bind(&gallery.image3)
        .bind(&gallery.image4)
        .bind(&gallery.video)
        .fetch_one(&self.pool)
        .await?;

        resync_identity(&self.pool, "galleries").await?;

        Ok(saved)
    }

    #[tracing::instrument(skip(self, gallery), fields(db.table = "galleries", db.operation = "update", db.record_id = %gallery.id))]
    async fn save(&self, gallery: &Gallery) -> Result<Gallery, AppError> {
        let saved = sqlx::query_as::<Postgres, Gallery>(
            r#"
            UPDATE galleries
            SET title = $2, image1 = $3, image2 = $4, image3 = $5, image4 = $6, video = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, image1, image2, image3, image4, video, created_at, updated_at
            "#,
        )
        .bind(gallery.id)
        .bind(&gallery.title)
        .bind(&gallery.image1)
        .bind(&gallery.image2)
        .bind(&gallery.image3)
        .bind(&gallery.image4)
        .bind(&gallery.video)
        .fetch_optional(&self.pool)
        .await?;

        saved.ok_or_else(|| AppError::NotFound("Event not found!".to_string()))
    }

    #[tracing::instrument(skip(self), fields(db.table = "galleries", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM galleries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
