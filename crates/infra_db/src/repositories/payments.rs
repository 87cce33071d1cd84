//! Payment repository and the engine's storage adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;
use core_kernel::{Amount, MerchantId, OrderId, PaymentId};
use domain_payment::{CardNetwork, Payment, PaymentStore, StoreError};

/// Database access for payment records
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a payment row in `processing` state.
    pub async fn insert_processing(&self, payment: &Payment) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO payments (id, order_id, merchant_id, amount, currency, method, status,
                                  vpa, card_network, card_last4, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            "#,
        )
        .bind(payment.id.as_str())
        .bind(payment.order_id.as_str())
        .bind(payment.merchant_id.as_uuid())
        .bind(payment.amount.minor_units())
        .bind(payment.currency.code())
        .bind(payment.method.as_str())
        .bind(payment.status.as_str())
        .bind(&payment.vpa)
        .bind(payment.card_network.map(|n| n.as_str()))
        .bind(&payment.card_last4)
        .bind(payment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Writes the terminal status and error fields of an admitted payment.
    pub async fn finalize(&self, payment: &Payment) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = $2, error_code = $3, error_description = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(payment.id.as_str())
        .bind(payment.status.as_str())
        .bind(&payment.error_code)
        .bind(&payment.error_description)
        .bind(payment.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Payment", &payment.id));
        }
        Ok(())
    }

    /// Fetches a payment by id, `None` when absent.
    pub async fn fetch(&self, id: &PaymentId) -> Result<Option<Payment>, DatabaseError> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, order_id, merchant_id, amount, currency, method, status,
                   vpa, card_network, card_last4, error_code, error_description,
                   created_at, updated_at
            FROM payments
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Payment::try_from).transpose()
    }

    /// All payments of a merchant, newest first.
    pub async fn list_for_merchant(
        &self,
        merchant_id: &MerchantId,
    ) -> Result<Vec<Payment>, DatabaseError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, order_id, merchant_id, amount, currency, method, status,
                   vpa, card_network, card_last4, error_code, error_description,
                   created_at, updated_at
            FROM payments
            WHERE merchant_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(merchant_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Payment::try_from).collect()
    }
}

/// The engine's storage port, backed by PostgreSQL
#[async_trait]
impl PaymentStore for PaymentRepository {
    async fn insert_processing(&self, payment: &Payment) -> Result<(), StoreError> {
        PaymentRepository::insert_processing(self, payment)
            .await
            .map_err(|e| {
                if e.is_duplicate() {
                    StoreError::IdCollision
                } else {
                    StoreError::Unavailable(e.to_string())
                }
            })
    }

    async fn mark_finalized(&self, payment: &Payment) -> Result<(), StoreError> {
        self.finalize(payment).await.map_err(|e| {
            if e.is_not_found() {
                StoreError::NotFound(payment.id.to_string())
            } else {
                StoreError::Unavailable(e.to_string())
            }
        })
    }

    async fn fetch(&self, id: &PaymentId) -> Result<Payment, StoreError> {
        match PaymentRepository::fetch(self, id).await {
            Ok(Some(payment)) => Ok(payment),
            Ok(None) => Err(StoreError::NotFound(id.to_string())),
            Err(e) => Err(StoreError::Unavailable(e.to_string())),
        }
    }
}

/// Database row for a payment
#[derive(Debug, Clone, sqlx::FromRow)]
struct PaymentRow {
    id: String,
    order_id: String,
    merchant_id: Uuid,
    amount: i64,
    currency: String,
    method: String,
    status: String,
    vpa: Option<String>,
    card_network: Option<String>,
    card_last4: Option<String>,
    error_code: Option<String>,
    error_description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DatabaseError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: PaymentId::from_trusted(row.id),
            order_id: OrderId::from_trusted(row.order_id),
            merchant_id: MerchantId::from_uuid(row.merchant_id),
            amount: Amount::from_minor(row.amount)
                .map_err(|e| DatabaseError::corrupt("Payment", e))?,
            currency: row
                .currency
                .parse()
                .map_err(|e| DatabaseError::corrupt("Payment", e))?,
            method: row
                .method
                .parse()
                .map_err(|e| DatabaseError::corrupt("Payment", e))?,
            status: row
                .status
                .parse()
                .map_err(|e| DatabaseError::corrupt("Payment", e))?,
            vpa: row.vpa,
            // Total parse; unrecognized stored values become Unknown.
            card_network: row
                .card_network
                .map(|n| n.parse::<CardNetwork>().unwrap_or(CardNetwork::Unknown)),
            card_last4: row.card_last4,
            error_code: row.error_code,
            error_description: row.error_description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
