use async_trait::async_trait;
use eventsite_core::{models::Contact, AppError};
use sqlx::{PgPool, Postgres};

use super::{resync_identity, RecordRepository};

/// Repository for contact-form submissions
#[derive(Clone)]
pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository<Contact> for PostgresContactRepository {
    #[tracing::instrument(skip(self), fields(db.table = "contacts", db.operation = "select", db.record_id = %id))]
    async fn find(&self, id: i32) -> Result<Option<Contact>, AppError> {
        let contact = sqlx::query_as::<Postgres, Contact>(
            "SELECT id, name, email, phone, message, created_at, updated_at FROM contacts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    #[tracing::instrument(skip(self), fields(db.table = "contacts", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<Contact>, AppError> {
        let rows = sqlx::query_as::<Postgres, Contact>(
            "SELECT id, name, email, phone, message, created_at, updated_at FROM contacts ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self, contact), fields(db.table = "contacts", db.operation = "insert"))]
    async fn insert(&self, contact: &Contact, id: Option<i32>) -> Result<Contact, AppError> {
        let Some(id) = id else {
            let saved = sqlx::query_as::<Postgres, Contact>(
                r#"
                INSERT INTO contacts (name, email, phone, message)
                VALUES ($1, $2, $3, $4)
                RETURNING id, name, email, phone, message, created_at, updated_at
                "#,
            )
            .bind(&contact.name)
            .bind(&contact.email)
            .bind(&contact.phone)
            .bind(&contact.message)
            .fetch_one(&self.pool)
            .await?;
            return Ok(saved);
        };

        let saved = sqlx::query_as::<Postgres, Contact>(
            r#"
            INSERT INTO contacts (id, name, email, phone, message)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                message = EXCLUDED.message,
                updated_at = NOW()
            RETURNING id, name, email, phone, message, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.message)
        .fetch_one(&self.pool)
        .await?;

        resync_identity(&self.pool, "contacts").await?;

        Ok(saved)
    }

    #[tracing::instrument(skip(self, contact), fields(db.table = "contacts", db.operation = "update", db.record_id = %contact.id))]
    async fn save(&self, contact: &Contact) -> Result<Contact, AppError> {
        let saved = sqlx::query_as::<Postgres, Contact>(
            r#"
            UPDATE contacts
            SET name = $2, email = $3, phone = $4, message = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, phone, message, created_at, updated_at
            "#,
        )
        .bind(contact.id)
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.message)
        .fetch_optional(&self.pool)
        .await?;

        saved.ok_or_else(|| AppError::NotFound("Contact not found".to_string()))
    }

    #[tracing::instrument(skip(self), fields(db.table = "contacts", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
