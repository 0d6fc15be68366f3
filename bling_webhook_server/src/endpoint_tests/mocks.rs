use bling_sync_engine::{
    db_types::{BlingId, LineItem, NewLineItem, NewOrder, Order},
    traits::{OrderSyncDatabase, OrderSyncError},
};
use mockall::mock;

mock! {
    pub SyncBackend {}
    impl OrderSyncDatabase for SyncBackend {
        fn url(&self) -> &str;
        async fn reconcile_order(&self, order: NewOrder, items: Vec<NewLineItem>) -> Result<Order, OrderSyncError>;
        async fn fetch_order_by_bling_id(&self, bling_id: &BlingId) -> Result<Option<Order>, OrderSyncError>;
        async fn fetch_line_items_for_order(&self, order_id: i64) -> Result<Vec<LineItem>, OrderSyncError>;
        async fn close(&mut self) -> Result<(), OrderSyncError>;
    }
    impl Clone for SyncBackend {
        fn clone(&self) -> Self;
    }
}
