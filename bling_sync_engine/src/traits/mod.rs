//! Interface contracts for order sync storage backends.
//!
//! [`OrderSyncDatabase`] defines the behaviour a backend must expose in order to act as the
//! persistent store for the sync engine. The SQLite implementation lives in the `sqlite` module;
//! a Postgres backend would implement the same trait.

mod order_sync_database;

pub use order_sync_database::{OrderSyncDatabase, OrderSyncError};
