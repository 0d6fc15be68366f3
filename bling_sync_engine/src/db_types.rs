use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use sqlx::{FromRow, Type};

//--------------------------------------      BlingId       ---------------------------------------------------------
/// The order identifier assigned by Bling. This is the natural key that deduplicates redelivered
/// events. The source encodes it as either a JSON number or a string, so it is stored canonically
/// as text. It is only ever a lookup key; line items join to their parent order via the internal
/// row id, never via this value.
#[derive(Debug, Clone, PartialEq, Eq, Type)]
#[sqlx(transparent)]
pub struct BlingId(pub String);

impl FromStr for BlingId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for BlingId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BlingId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<i64> for BlingId {
    fn from(v: i64) -> Self {
        Self(v.to_string())
    }
}

impl Display for BlingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl BlingId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------        Order       ---------------------------------------------------------
/// An order row as stored in the database.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Order {
    /// The internally assigned identifier. Line items reference this, not the Bling id.
    pub id: i64,
    pub bling_id: BlingId,
    pub order_number: Option<String>,
    pub store_id: Option<i64>,
    pub invoice_id: Option<i64>,
    pub order_date: Option<String>,
    pub ship_date: Option<String>,
    pub delivery_date: Option<String>,
    pub total_value: f64,
    pub status_id: Option<String>,
    pub discount_value: Option<f64>,
    /// Server-assigned. Bumped on every write, including conflict updates.
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      NewOrder      ---------------------------------------------------------
/// A normalized order record, ready to be reconciled into the store. Produced by the webhook
/// server's payload conversion; carries no internal identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// The order id as assigned by Bling.
    pub bling_id: BlingId,
    pub order_number: Option<String>,
    /// The id of the storefront the order was placed on.
    pub store_id: Option<i64>,
    /// The id of the invoice issued for the order, if any.
    pub invoice_id: Option<i64>,
    pub order_date: Option<String>,
    pub ship_date: Option<String>,
    pub delivery_date: Option<String>,
    pub total_value: f64,
    /// Bling's numeric order status, stored as text so that differently-encoded redeliveries
    /// compare equal.
    pub status_id: Option<String>,
    pub discount_value: Option<f64>,
}

impl NewOrder {
    pub fn new<I: Into<BlingId>>(bling_id: I, total_value: f64) -> Self {
        Self {
            bling_id: bling_id.into(),
            order_number: None,
            store_id: None,
            invoice_id: None,
            order_date: None,
            ship_date: None,
            delivery_date: None,
            total_value,
            status_id: None,
            discount_value: None,
        }
    }
}

//--------------------------------------      LineItem      ---------------------------------------------------------
/// A line item row as stored in the database. Exactly one row exists per `(order_id, sku)` pair.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct LineItem {
    pub id: i64,
    /// The internal id of the parent order.
    pub order_id: i64,
    pub sku: String,
    pub quantity: Option<i64>,
    pub unit_value: Option<f64>,
    pub description: Option<String>,
}

//--------------------------------------    NewLineItem     ---------------------------------------------------------
/// A normalized line item. The parent's internal id is not known at normalization time; the store
/// attaches it after the parent order has been upserted, inside the same transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLineItem {
    pub sku: String,
    pub quantity: Option<i64>,
    pub unit_value: Option<f64>,
    pub description: Option<String>,
}

impl NewLineItem {
    pub fn new<S: Into<String>>(sku: S) -> Self {
        Self { sku: sku.into(), quantity: None, unit_value: None, description: None }
    }
}
