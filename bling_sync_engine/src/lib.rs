//! # Bling Sync Engine
//!
//! The engine side of the Bling order sync service. It owns the typed order and line-item
//! records, the [`OrderSyncDatabase`] contract that storage backends implement, and the SQLite
//! backend used in production.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@sqlite`]). You should never need to access the
//!    database directly; use the public API instead. The exception is the data types used in the
//!    database, which are defined in the `db_types` module and are public.
//! 2. The public API ([`OrderSyncApi`]). This is what the webhook server calls to reconcile an
//!    incoming order event. Specific backends need to implement the traits in [`mod@traits`] in
//!    order to act as a backend for the sync engine.

pub mod api;
pub mod db_types;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use api::OrderSyncApi;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use traits::{OrderSyncDatabase, OrderSyncError};
