//! Customer orders, persisted in the relational datastore.

mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use memory::MemoryOrderStore;
pub use postgres::PgOrderStore;

/// A stored order. `order_id` and `created_at` are only meaningful once the
/// datastore has accepted the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub order_id: i64,
    pub user_id: i64,
    pub total: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Body of a create request. Ids and timestamps in the body are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewOrder {
    pub total: f64,
    pub status: String,
}

impl Order {
    pub fn from_new(order_id: i64, user_id: i64, new: NewOrder, created_at: DateTime<Utc>) -> Self {
        Self { order_id, user_id, total: new.total, status: new.status, created_at }
    }
}

/// Storage backend for orders.
///
/// Failures are opaque to callers; they end up as a generic 500.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Every order of `user_id`, oldest first. Empty when there are none.
    async fn list_by_user(&self, user_id: i64) -> anyhow::Result<Vec<Order>>;

    /// Inserts the order and returns the id the datastore assigned.
    async fn insert(
        &self,
        user_id: i64,
        order: &NewOrder,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<i64>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> anyhow::Result<()>;
}
