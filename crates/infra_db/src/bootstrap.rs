//! Schema migrations and startup seeding

use sqlx::PgPool;
use tracing::info;

use crate::error::DatabaseError;
use crate::repositories::MerchantRepository;
use domain_merchant::{Merchant, SeedMerchant};

/// Applies the embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DatabaseError> {
    info!("Running database migrations");
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    info!("Database ready");
    Ok(())
}

/// Seeds the configured test merchant unless one with the same email
/// already exists. Returns the merchant record either way.
pub async fn seed_merchant(pool: &PgPool, seed: &SeedMerchant) -> Result<Merchant, DatabaseError> {
    let repo = MerchantRepository::new(pool.clone());

    if let Some(existing) = repo.find_by_email(&seed.email).await? {
        info!(email = %seed.email, "Seed merchant already present");
        return Ok(existing);
    }

    let merchant = repo.insert_seed(seed).await?;
    info!(email = %seed.email, merchant_id = %merchant.id, "Seed merchant created");
    Ok(merchant)
}

/// Cheap connectivity probe for the health endpoint.
pub async fn ping(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}
