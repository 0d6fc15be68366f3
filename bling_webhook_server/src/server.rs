use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use bling_sync_engine::{OrderSyncApi, SqliteDatabase};

use crate::{
    config::{ServerConfig, BLING_SIGNATURE_HEADER},
    errors::ServerError,
    middleware::HmacMiddlewareFactory,
    routes::{health, BlingWebhookRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(ServerError::from)
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let sync_api = OrderSyncApi::new(db.clone());
        let hmac = HmacMiddlewareFactory::new(
            BLING_SIGNATURE_HEADER,
            config.bling.hmac_secret.clone(),
            config.bling.hmac_checks,
        );
        // The whole webhook scope sits behind the signature check; nothing in it runs for an
        // unauthenticated request.
        let webhook_scope = web::scope("/bling").wrap(hmac).service(BlingWebhookRoute::<SqliteDatabase>::new());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("bss::access_log"))
            .app_data(web::Data::new(sync_api))
            .service(health)
            .service(webhook_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
