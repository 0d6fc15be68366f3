use thiserror::Error;

use crate::db_types::{BlingId, LineItem, NewLineItem, NewOrder, Order};

/// The storage contract for the order sync engine.
///
/// The central operation is [`reconcile_order`](OrderSyncDatabase::reconcile_order): one call per
/// accepted webhook event, executed as a single atomic unit of work. Backends must guarantee that
/// either every write in the call commits, or none do; a partially reconciled order must never be
/// observable by readers.
#[allow(async_fn_in_trait)]
pub trait OrderSyncDatabase: Clone {
    /// The URL of the database.
    fn url(&self) -> &str;

    /// Takes a normalized order and its line items, and in a single atomic transaction:
    /// * upserts the order row, keyed on its natural key (`bling_id`). The upsert must be one
    ///   atomic conditional insert-or-update, not a check-then-act sequence, so that concurrent
    ///   redeliveries of the same order converge instead of racing.
    /// * resolves the internally assigned order id, observing the upsert above.
    /// * upserts every line item, keyed on `(order id, sku)`.
    ///
    /// This call is idempotent: redelivering identical content leaves the store in the same
    /// observable state (with `updated_at` advanced). Redelivering changed content converges to
    /// the latest payload's values without creating duplicate rows.
    ///
    /// Returns the stored order row, including the internal id.
    async fn reconcile_order(&self, order: NewOrder, items: Vec<NewLineItem>) -> Result<Order, OrderSyncError>;

    /// Returns the order with the given Bling id, if it exists.
    async fn fetch_order_by_bling_id(&self, bling_id: &BlingId) -> Result<Option<Order>, OrderSyncError>;

    /// Returns the line items belonging to the order with the given internal id, ordered by sku.
    async fn fetch_line_items_for_order(&self, order_id: i64) -> Result<Vec<LineItem>, OrderSyncError>;

    /// Closes the backend's connections.
    async fn close(&mut self) -> Result<(), OrderSyncError>;
}

#[derive(Debug, Clone, Error)]
pub enum OrderSyncError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    /// The order row could not be resolved immediately after its own upsert, inside the same
    /// transaction. The atomic upsert makes this unreachable; if it ever fires, it is an
    /// internal consistency failure and the transaction must be rolled back.
    #[error("Order {0} could not be resolved after its upsert. The transaction has been rolled back.")]
    OrderVanished(BlingId),
}

impl From<sqlx::Error> for OrderSyncError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}
