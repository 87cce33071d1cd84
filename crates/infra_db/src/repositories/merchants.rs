//! Merchant repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;
use core_kernel::MerchantId;
use domain_merchant::{Merchant, SeedMerchant};

/// Database access for merchant records
#[derive(Debug, Clone)]
pub struct MerchantRepository {
    pool: PgPool,
}

impl MerchantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Looks up a merchant by its exact API key/secret pair.
    ///
    /// Returns `None` for any non-match; the caller decides what an
    /// authentication failure looks like.
    pub async fn find_by_credentials(
        &self,
        api_key: &str,
        api_secret: &str,
    ) -> Result<Option<Merchant>, DatabaseError> {
        let row = sqlx::query_as::<_, MerchantRow>(
            r#"
            SELECT id, name, email, api_key, api_secret, webhook_url,
                   is_active, created_at, updated_at
            FROM merchants
            WHERE api_key = $1 AND api_secret = $2
            "#,
        )
        .bind(api_key)
        .bind(api_secret)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Merchant::from))
    }

    /// Looks up a merchant by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Merchant>, DatabaseError> {
        let row = sqlx::query_as::<_, MerchantRow>(
            r#"
            SELECT id, name, email, api_key, api_secret, webhook_url,
                   is_active, created_at, updated_at
            FROM merchants
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Merchant::from))
    }

    /// Inserts a merchant from seed identity fields.
    pub async fn insert_seed(&self, seed: &SeedMerchant) -> Result<Merchant, DatabaseError> {
        let id = MerchantId::new();
        let row = sqlx::query_as::<_, MerchantRow>(
            r#"
            INSERT INTO merchants (id, name, email, api_key, api_secret)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, api_key, api_secret, webhook_url,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(&seed.name)
        .bind(&seed.email)
        .bind(&seed.api_key)
        .bind(&seed.api_secret)
        .fetch_one(&self.pool)
        .await?;

        Ok(Merchant::from(row))
    }
}

/// Database row for a merchant
#[derive(Debug, Clone, sqlx::FromRow)]
struct MerchantRow {
    id: Uuid,
    name: String,
    email: String,
    api_key: String,
    api_secret: String,
    webhook_url: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MerchantRow> for Merchant {
    fn from(row: MerchantRow) -> Self {
        Merchant {
            id: MerchantId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            api_key: row.api_key,
            api_secret: row.api_secret,
            webhook_url: row.webhook_url,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
