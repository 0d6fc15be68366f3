use actix_web::http::StatusCode;
use bling_sync_engine::{
    db_types::{NewOrder, Order},
    traits::OrderSyncError,
};
use chrono::Utc;

use super::{
    helpers::{post_webhook, sign},
    mocks::MockSyncBackend,
};

const ORDER_CREATED: &str = r#"{"event":"order.created","data":{"id":100,"numero":"A1","loja":{"id":5},"total":199.90,"situacao":{"id":3},"itens":[{"codigo":"SKU1","quantidade":2,"valor":99.95,"descricao":"Widget"}]}}"#;

// What the backend would hand back after storing `order` under internal id 1.
fn stored(order: NewOrder) -> Order {
    Order {
        id: 1,
        bling_id: order.bling_id,
        order_number: order.order_number,
        store_id: order.store_id,
        invoice_id: order.invoice_id,
        order_date: order.order_date,
        ship_date: order.ship_date,
        delivery_date: order.delivery_date,
        total_value: order.total_value,
        status_id: order.status_id,
        discount_value: order.discount_value,
        updated_at: Utc::now(),
    }
}

#[actix_web::test]
async fn signed_order_event_is_reconciled() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSyncBackend::new();
    backend
        .expect_reconcile_order()
        .withf(|order, items| {
            order.bling_id.as_str() == "100"
                && order.status_id.as_deref() == Some("3")
                && items.len() == 1
                && items[0].sku == "SKU1"
                && items[0].quantity == Some(2)
        })
        .times(1)
        .returning(|order, _| Ok(stored(order)));

    let sig = sign(ORDER_CREATED);
    let (status, body) = post_webhook(backend, ORDER_CREATED, Some(&sig)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#), "unexpected body: {body}");
}

#[actix_web::test]
async fn other_event_classes_are_acknowledged_without_storage_access() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSyncBackend::new();
    backend.expect_reconcile_order().times(0);

    let body = r#"{"event":"customer.updated","data":{"id":55}}"#;
    let sig = sign(body);
    let (status, body) = post_webhook(backend, body, Some(&sig)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Event ignored: customer.updated"), "unexpected body: {body}");
}

#[actix_web::test]
async fn missing_signature_is_unauthorized() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSyncBackend::new();
    backend.expect_reconcile_order().times(0);

    let (status, body) = post_webhook(backend, ORDER_CREATED, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("error"), "unexpected body: {body}");
}

#[actix_web::test]
async fn tampered_signature_is_unauthorized() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSyncBackend::new();
    backend.expect_reconcile_order().times(0);

    // A valid signature over a different body
    let sig = sign(r#"{"event":"order.created","data":{"id":101}}"#);
    let (status, _) = post_webhook(backend, ORDER_CREATED, Some(&sig)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn backend_failure_is_a_server_error() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSyncBackend::new();
    backend
        .expect_reconcile_order()
        .times(1)
        .returning(|_, _| Err(OrderSyncError::DatabaseError("connection reset".to_string())));

    let sig = sign(ORDER_CREATED);
    let (status, body) = post_webhook(backend, ORDER_CREATED, Some(&sig)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains(r#""success":false"#), "unexpected body: {body}");
}

#[actix_web::test]
async fn unusable_order_payload_is_a_server_error() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSyncBackend::new();
    backend.expect_reconcile_order().times(0);

    // An order event with no order id cannot be reconciled
    let body = r#"{"event":"order.created","data":{"total":10.0}}"#;
    let sig = sign(body);
    let (status, body) = post_webhook(backend, body, Some(&sig)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains(r#""success":false"#), "unexpected body: {body}");
}

#[actix_web::test]
async fn malformed_json_with_valid_signature_is_a_server_error() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSyncBackend::new();
    backend.expect_reconcile_order().times(0);

    let body = "this is not json";
    let sig = sign(body);
    let (status, body) = post_webhook(backend, body, Some(&sig)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Invalid JSON payload"), "unexpected body: {body}");
}
