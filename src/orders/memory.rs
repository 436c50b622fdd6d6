//! In-process order storage for tests and local runs without a database.

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::{NewOrder, Order, OrderStore};

#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    rows: Mutex<Vec<Order>>,
    unavailable: bool,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails, as a datastore that is down would.
    pub fn unavailable() -> Self {
        Self { rows: Mutex::default(), unavailable: true }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            bail!("order store unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Order>> {
        self.check()?;
        Ok(self.rows.lock().iter().filter(|o| o.user_id == user_id).cloned().collect())
    }

    async fn insert(&self, user_id: i64, order: &NewOrder, created_at: DateTime<Utc>) -> Result<i64> {
        self.check()?;
        let mut rows = self.rows.lock();
        // SERIAL starts at 1
        let order_id = rows.len() as i64 + 1;
        rows.push(Order::from_new(order_id, user_id, order.clone(), created_at));
        Ok(order_id)
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }
}
