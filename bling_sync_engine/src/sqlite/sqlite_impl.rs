//! `SqliteDatabase` is the concrete SQLite backend for the order sync engine.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements the [`OrderSyncDatabase`] trait
//! defined in the [`crate::traits`] module.
use std::fmt::Debug;

use log::{debug, trace};
use sqlx::SqlitePool;

use super::db::{db_url, line_items, new_pool, orders};
use crate::{
    db_types::{BlingId, LineItem, NewLineItem, NewOrder, Order},
    traits::{OrderSyncDatabase, OrderSyncError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl OrderSyncDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Takes a normalized order and its line items, and in a single atomic transaction,
    /// * upserts the order row, keyed on the `bling_id` uniqueness constraint,
    /// * resolves the internal order id from the upsert's returned row,
    /// * upserts every line item against that internal id, keyed on `(order_id, sku)`.
    ///
    /// Any failure rolls the whole transaction back; no partial write survives.
    async fn reconcile_order(&self, order: NewOrder, items: Vec<NewLineItem>) -> Result<Order, OrderSyncError> {
        let mut tx = self.pool.begin().await?;
        let saved = orders::upsert_order(&order, &mut tx)
            .await?
            .ok_or_else(|| OrderSyncError::OrderVanished(order.bling_id.clone()))?;
        debug!("🗃️ Order {} upserted with internal id {}", saved.bling_id, saved.id);
        for item in &items {
            let line = line_items::upsert_line_item(saved.id, item, &mut tx).await?;
            trace!("🗃️ Line item [{}] of order {} saved with id {}", line.sku, saved.bling_id, line.id);
        }
        tx.commit().await?;
        Ok(saved)
    }

    async fn fetch_order_by_bling_id(&self, bling_id: &BlingId) -> Result<Option<Order>, OrderSyncError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_bling_id(bling_id, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_line_items_for_order(&self, order_id: i64) -> Result<Vec<LineItem>, OrderSyncError> {
        let mut conn = self.pool.acquire().await?;
        let items = line_items::fetch_line_items_for_order(order_id, &mut conn).await?;
        Ok(items)
    }

    async fn close(&mut self) -> Result<(), OrderSyncError> {
        self.pool.close().await;
        Ok(())
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the URL from the environment, or the default.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
