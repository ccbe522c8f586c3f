use async_trait::async_trait;
use eventsite_core::{models::Hero, AppError};
use sqlx::{PgPool, Postgres};

use super::{resync_identity, RecordRepository};

/// Repository for the hero banner
#[derive(Clone)]
pub struct PostgresHeroRepository {
    pool: PgPool,
}

impl PostgresHeroRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository<Hero> for PostgresHeroRepository {
    #[tracing::instrument(skip(self), fields(db.table = "heroes", db.operation = "select", db.record_id = %id))]
    async fn find(&self, id: i32) -> Result<Option<Hero>, AppError> {
        let hero = sqlx::query_as::<Postgres, Hero>(
            "SELECT id, name, description, motto, video, image1, image2, created_at, updated_at FROM heroes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hero)
    }

    #[tracing::instrument(skip(self), fields(db.table = "heroes", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<Hero>, AppError> {
        let heroes = sqlx::query_as::<Postgres, Hero>(
            "SELECT id, name, description, motto, video, image1, image2, created_at, updated_at FROM heroes ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(heroes)
    }

    #[tracing::instrument(skip(self, hero), fields(db.table = "heroes", db.operation = "insert"))]
    async fn insert(&self, hero: &Hero, id: Option<i32>) -> Result<Hero, AppError> {
        let Some(id) = id else {
            let saved = sqlx::query_as::<Postgres, Hero>(
                r#"
                INSERT INTO heroes (name, description, motto, video, image1, image2)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, name, description, motto, video, image1, image2, created_at, updated_at
                "#,
            )
            .bind(&hero.name)
            .bind(&hero.description)
            .bind(&hero.motto)
            .bind(&hero.video)
            .bind(&hero.image1)
            .bind(&hero.image2)
            .fetch_one(&self.pool)
            .await?;
            return Ok(saved);
        };

        let saved = sqlx::query_as::<Postgres, Hero>(
            r#"
            INSERT INTO heroes (id, name, description, motto, video, image1, image2)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                motto = EXCLUDED.motto,
                video = EXCLUDED.video,
                image1 = EXCLUDED.image1,
                image2 = EXCLUDED.image2,
                updated_at = NOW()
            RETURNING id, name, description, motto, video, image1, image2, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&hero.name)
        .bind(&hero.description)
        .bind(&hero.motto)
        .bind(&hero.video)
        .bind(&hero.image1)
        .bind(&hero.image2)
        .fetch_one(&self.pool)
        .await?;

        resync_identity(&self.pool, "heroes").await?;

        Ok(saved)
    }

    #[tracing::instrument(skip(self, hero), fields(db.table = "heroes", db.operation = "update", db.record_id = %hero.id))]
    async fn save(&self, hero: &Hero) -> Result<Hero, AppError> {
        let saved = sqlx::query_as::<Postgres, Hero>(
            r#"
            UPDATE heroes
            SET name = $2, description = $3, motto = $4, video = $5, image1 = $6, image2 = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, motto, video, image1, image2, created_at, updated_at
            "#,
        )
        .bind(hero.id)
        .bind(&hero.name)
        .bind(&hero.description)
        .bind(&hero.motto)
        .bind(&hero.video)
        .bind(&hero.image1)
        .bind(&hero.image2)
        .fetch_optional(&self.pool)
        .await?;

        saved.ok_or_else(|| AppError::NotFound("Hero section not found".to_string()))
    }

    #[tracing::instrument(skip(self), fields(db.table = "heroes", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM heroes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
