//! PostgreSQL order storage.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::{debug, info};

use super::{NewOrder, Order, OrderStore};

// Casts keep the row types stable whether the columns are INTEGER/NUMERIC
// or BIGINT/DOUBLE PRECISION.
const SELECT_BY_USER: &str = "\
    SELECT order_id::int8 AS order_id, user_id::int8 AS user_id, total::float8 AS total, \
           status, created_at::timestamptz AS created_at \
    FROM orders WHERE user_id = $1 ORDER BY order_id";

const INSERT: &str = "\
    INSERT INTO orders (user_id, total, status, created_at) \
    VALUES ($1, $2, $3, $4) RETURNING order_id::int8";

/// Order storage backed by an `orders` table.
#[derive(Debug, Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a bounded pool. `acquire_timeout` caps how long a request may
    /// wait for a free connection.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> crate::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;
        info!(max_connections, "connected to order datastore");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Order>> {
        let orders: Vec<Order> = sqlx::query_as(SELECT_BY_USER)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to query orders for user {user_id}"))?;
        debug!(user_id, count = orders.len(), "orders fetched");
        Ok(orders)
    }

    async fn insert(&self, user_id: i64, order: &NewOrder, created_at: DateTime<Utc>) -> Result<i64> {
        let order_id: i64 = sqlx::query_scalar(INSERT)
            .bind(user_id)
            .bind(order.total)
            .bind(&order.status)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("Failed to insert order for user {user_id}"))?;
        debug!(user_id, order_id, "order inserted");
        Ok(order_id)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Order datastore unreachable")?;
        Ok(())
    }
}
