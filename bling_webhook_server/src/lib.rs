//! # Bling webhook server
//! This crate hosts the HTTP side of the Bling order sync service. It is responsible for:
//! * Listening for incoming webhook notifications from Bling.
//! * Verifying the HMAC signature of each request against the shared signing secret.
//! * Converting accepted order payloads into normalized records and handing them to the sync
//!   engine for reconciliation.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more
//! information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/bling/webhook/orders`: The webhook route for receiving order events from Bling.

pub mod bling_event;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod integrations;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
