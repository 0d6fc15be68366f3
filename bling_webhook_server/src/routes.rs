//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module
//! neat and tidy 🙏
//!
//! Since each worker thread processes its requests sequentially, any long, non-cpu-bound
//! operation (the reconciliation call into the store, in this server's case) must be expressed as
//! a future so that worker threads keep serving other requests while it is in flight.

use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use bling_sync_engine::{OrderSyncApi, OrderSyncDatabase};
use log::*;

use crate::{bling_event::BlingEvent, data_objects::JsonResponse, integrations::bling::new_order_from_event};

// Web-actix cannot handle generics in handlers, so the registration is implemented manually using
// the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ----------------------------------------------  Webhook  ----------------------------------------------------

route!(bling_webhook => Post "webhook/orders" impl OrderSyncDatabase);
/// The order webhook endpoint. By the time this runs, the HMAC middleware has already
/// authenticated the raw body; what is left is the class filter and the
/// normalize-then-reconcile pipeline. Every terminal state answers with a short
/// [`JsonResponse`]:
/// * events outside the `order.*` family are acknowledged with a 200 so Bling does not redeliver
///   an event class this server intentionally ignores,
/// * an unparseable body, a payload that cannot produce a usable record, or a store failure
///   answers 500 so Bling's retry policy redelivers it (the idempotent upsert makes that safe).
pub async fn bling_webhook<B>(
    req: HttpRequest,
    body: web::Bytes,
    api: web::Data<OrderSyncApi<B>>,
) -> HttpResponse
where
    B: OrderSyncDatabase,
{
    trace!("🛒️ Received webhook request: {}", req.uri());
    let event: BlingEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            warn!("🛒️ Could not parse webhook payload. {e}");
            return HttpResponse::InternalServerError()
                .json(JsonResponse::failure(format!("Invalid JSON payload: {e}")));
        },
    };
    if !event.is_order_event() {
        info!("🛒️ Ignoring event class [{}]", event.event);
        return HttpResponse::Ok().json(JsonResponse::success(format!("Event ignored: {}", event.event)));
    }
    let event_class = event.event;
    let (order, items) = match new_order_from_event(event.data) {
        Err(e) => {
            warn!("🛒️ Could not convert incoming [{event_class}] payload. {e}");
            return HttpResponse::InternalServerError().json(JsonResponse::failure(e));
        },
        Ok(converted) => converted,
    };
    let bling_id = order.bling_id.clone();
    let n_items = items.len();
    match api.process_order_event(order, items).await {
        Ok(saved) => {
            info!("🛒️ Order {} reconciled with {n_items} line item(s) from [{event_class}].", saved.bling_id);
            HttpResponse::Ok().json(JsonResponse::success("Order processed successfully."))
        },
        Err(e) => {
            warn!("🛒️ Could not reconcile order {bling_id} from [{event_class}]. {e}");
            HttpResponse::InternalServerError().json(JsonResponse::failure(e))
        },
    }
}
