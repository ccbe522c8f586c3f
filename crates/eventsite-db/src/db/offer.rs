use async_trait::async_trait;
use eventsite_core::{models::Offer, AppError};
use sqlx::{PgPool, Postgres};

use super::{resync_identity, RecordRepository};

/// Repository for priced offers
#[derive(Clone)]
pub struct PostgresOfferRepository {
    pool: PgPool,
}

impl PostgresOfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository<Offer> for PostgresOfferRepository {
    #[tracing::instrument(skip(self), fields(db.table = "offers", db.operation = "select", db.record_id = %id))]
    async fn find(&self, id: i32) -> Result<Option<Offer>, AppError> {
        let offer = sqlx::query_as::<Postgres, Offer>(
            "SELECT id, offer_title, description, price, original_price, created_at, updated_at FROM offers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(offer)
    }

    #[tracing::instrument(skip(self), fields(db.table = "offers", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<Offer>, AppError> {
        let rows = sqlx::query_as::<Postgres, Offer>(
            "SELECT id, offer_title, description, price, original_price, created_at, updated_at FROM offers ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self, offer), fields(db.table = "offers", db.operation = "insert"))]
    async fn insert(&self, offer: &Offer, id: Option<i32>) -> Result<Offer, AppError> {
        let Some(id) = id else {
            let saved = sqlx::query_as::<Postgres, Offer>(
                r#"
                INSERT INTO offers (offer_title, description, price, original_price)
                VALUES ($1, $2, $3, $4)
                RETURNING id, offer_title, description, price, original_price, created_at, updated_at
                "#,
            )
            .bind(&offer.offer_title)
            .bind(&offer.description)
            .bind(offer.price)
            .bind(offer.original_price)
            .fetch_one(&self.pool)
            .await?;
            return Ok(saved);
        };

        let saved = sqlx::query_as::<Postgres, Offer>(
            r#"
            INSERT INTO offers (id, offer_title, description, price, original_price)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                offer_title = EXCLUDED.offer_title,
                description = EXCLUDED.description,
                price = EXCLUDED.price,
                original_price = EXCLUDED.original_price,
                updated_at = NOW()
            RETURNING id, offer_title, description, price, original_price, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&offer.offer_title)
        .bind(&offer.description)
        .bind(offer.price)
        .bind(offer.original_price)
        .fetch_one(&self.pool)
        .await?;

        resync_identity(&self.pool, "offers").await?;

        Ok(saved)
    }

    #[tracing::instrument(skip(self, offer), fields(db.table = "offers", db.operation = "update", db.record_id = %offer.id))]
    async fn save(&self, offer: &Offer) -> Result<Offer, AppError> {
        let saved = sqlx::query_as::<Postgres, Offer>(
            r#"
            UPDATE offers
            SET offer_title = $2, description = $3, price = $4, original_price = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, offer_title, description, price, original_price, created_at, updated_at
            "#,
        )
        .bind(offer.id)
        .bind(&offer.offer_title)
        .bind(&offer.description)
        .bind(offer.price)
        .bind(offer.original_price)
        .fetch_optional(&self.pool)
        .await?;

        saved.ok_or_else(|| AppError::NotFound("Offer not found".to_string()))
    }

    #[tracing::instrument(skip(self), fields(db.table = "offers", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
