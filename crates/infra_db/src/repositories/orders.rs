//! Order repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DatabaseError;
use core_kernel::{Amount, MerchantId, OrderId};
use domain_order::Order;

/// Bound on insert retries when a generated order id collides.
const MAX_ID_ATTEMPTS: u32 = 5;

/// Database access for order records
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a new order.
    ///
    /// Uniqueness of the generated id is enforced by the primary key; a
    /// conflict regenerates the id and retries, bounded. The stored order
    /// (with its final id) is returned.
    pub async fn create(&self, mut order: Order) -> Result<Order, DatabaseError> {
        let mut attempts = 0;
        loop {
            match self.insert(&order).await {
                Ok(stored) => return Ok(stored),
                Err(e) if e.is_duplicate() => {
                    attempts += 1;
                    if attempts >= MAX_ID_ATTEMPTS {
                        return Err(e);
                    }
                    debug!(order_id = %order.id, "order id collision, regenerating");
                    order = order.with_regenerated_id();
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn insert(&self, order: &Order) -> Result<Order, DatabaseError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (id, merchant_id, amount, currency, receipt, notes, status,
                                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING id, merchant_id, amount, currency, receipt, notes, status,
                      created_at, updated_at
            "#,
        )
        .bind(order.id.as_str())
        .bind(order.merchant_id.as_uuid())
        .bind(order.amount.minor_units())
        .bind(order.currency.code())
        .bind(&order.receipt)
        .bind(serde_json::Value::Object(order.notes.clone()))
        .bind(order.status.as_str())
        .bind(order.created_at)
        .fetch_one(&self.pool)
        .await?;

        Order::try_from(row)
    }

    /// Fetches an order by id, `None` when absent.
    pub async fn fetch(&self, id: &OrderId) -> Result<Option<Order>, DatabaseError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, merchant_id, amount, currency, receipt, notes, status,
                   created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }
}

/// Database row for an order
#[derive(Debug, Clone, sqlx::FromRow)]
struct OrderRow {
    id: String,
    merchant_id: Uuid,
    amount: i64,
    currency: String,
    receipt: Option<String>,
    notes: serde_json::Value,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DatabaseError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let notes = match row.notes {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => serde_json::Map::new(),
            other => return Err(DatabaseError::corrupt("Order", format!("notes: {other}"))),
        };
        Ok(Order {
            id: OrderId::from_trusted(row.id),
            merchant_id: MerchantId::from_uuid(row.merchant_id),
            amount: Amount::from_minor(row.amount)
                .map_err(|e| DatabaseError::corrupt("Order", e))?,
            currency: row
                .currency
                .parse()
                .map_err(|e| DatabaseError::corrupt("Order", e))?,
            receipt: row.receipt,
            notes,
            status: row
                .status
                .parse()
                .map_err(|e| DatabaseError::corrupt("Order", e))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
