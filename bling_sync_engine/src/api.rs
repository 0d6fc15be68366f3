//! The public face of the sync engine: a thin facade over an [`OrderSyncDatabase`] backend that
//! the webhook server drives.

use log::debug;

use crate::{
    db_types::{BlingId, LineItem, NewLineItem, NewOrder, Order},
    traits::{OrderSyncDatabase, OrderSyncError},
};

pub struct OrderSyncApi<B> {
    db: B,
}

impl<B> OrderSyncApi<B>
where B: OrderSyncDatabase
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Reconciles a normalized order event into the store. Delegates to the backend's single
    /// atomic unit of work; see [`OrderSyncDatabase::reconcile_order`].
    pub async fn process_order_event(
        &self,
        order: NewOrder,
        items: Vec<NewLineItem>,
    ) -> Result<Order, OrderSyncError> {
        debug!("🗃️ Reconciling order {} with {} line item(s)", order.bling_id, items.len());
        let saved = self.db.reconcile_order(order, items).await?;
        debug!("🗃️ Order {} stored with internal id {}", saved.bling_id, saved.id);
        Ok(saved)
    }

    pub async fn fetch_order(&self, bling_id: &BlingId) -> Result<Option<Order>, OrderSyncError> {
        self.db.fetch_order_by_bling_id(bling_id).await
    }

    pub async fn fetch_line_items(&self, order_id: i64) -> Result<Vec<LineItem>, OrderSyncError> {
        self.db.fetch_line_items_for_order(order_id).await
    }
}
