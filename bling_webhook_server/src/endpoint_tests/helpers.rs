use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web, App};
use bling_sync_engine::OrderSyncApi;
use bss_common::Secret;

use super::mocks::MockSyncBackend;
use crate::{
    config::BLING_SIGNATURE_HEADER,
    helpers::calculate_hmac,
    middleware::HmacMiddlewareFactory,
    routes::BlingWebhookRoute,
};

// The secret the test app verifies against. DO NOT re-use this value anywhere.
pub const TEST_SECRET: &str = "test-webhook-secret";

pub fn sign(body: &str) -> String {
    calculate_hmac(TEST_SECRET, body.as_bytes())
}

/// Posts `body` at the webhook endpoint of an app backed by the given mock, optionally carrying a
/// signature header, and returns the response status and body.
pub async fn post_webhook(backend: MockSyncBackend, body: &str, signature: Option<&str>) -> (StatusCode, String) {
    let api = OrderSyncApi::new(backend);
    let hmac = HmacMiddlewareFactory::new(BLING_SIGNATURE_HEADER, Secret::new(TEST_SECRET.to_string()), true);
    let app = App::new()
        .app_data(web::Data::new(api))
        .service(web::scope("/bling").wrap(hmac).service(BlingWebhookRoute::<MockSyncBackend>::new()));
    let service = test::init_service(app).await;

    let mut req = TestRequest::post()
        .uri("/bling/webhook/orders")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.to_string());
    if let Some(sig) = signature {
        req = req.insert_header((BLING_SIGNATURE_HEADER, sig));
    }
    match test::try_call_service(&service, req.to_request()).await {
        Ok(res) => {
            let (_, res) = res.into_parts();
            let status = res.status();
            let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
            (status, body)
        },
        // Middleware and extractor failures surface as errors; render them the way the running
        // server would.
        Err(e) => {
            let res = e.error_response();
            let status = res.status();
            let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
            (status, body)
        },
    }
}
