//! Wire types for the Bling webhook payload.
//!
//! Bling's payloads are loosely typed: sub-objects come and go depending on the order's state,
//! and identifiers may arrive as numbers or strings. Every field that the source may omit is an
//! `Option` (or defaults to empty), so deserialization never fails on an absent key. The mapping
//! into normalized records, with its fallback rules, lives in [`crate::integrations::bling`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events outside this family are acknowledged and discarded without touching storage.
pub const ORDER_EVENT_PREFIX: &str = "order.";

/// The envelope Bling posts to the webhook endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlingEvent {
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub data: BlingOrderDetails,
}

impl BlingEvent {
    pub fn is_order_event(&self) -> bool {
        self.event.starts_with(ORDER_EVENT_PREFIX)
    }
}

/// The nested order details of an `order.*` event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlingOrderDetails {
    /// Bling's order id. A number or a string, depending on the publisher version.
    pub id: Option<Value>,
    pub numero: Option<String>,
    pub loja: Option<BlingRef>,
    #[serde(rename = "notaFiscal")]
    pub nota_fiscal: Option<BlingRef>,
    pub data: Option<String>,
    #[serde(rename = "dataSaida")]
    pub data_saida: Option<String>,
    #[serde(rename = "dataPrevista")]
    pub data_prevista: Option<String>,
    pub total: Option<f64>,
    pub situacao: Option<BlingStatus>,
    pub desconto: Option<BlingDiscount>,
    #[serde(default)]
    pub itens: Vec<BlingItem>,
}

/// A nested `{ "id": ... }` reference (storefront, invoice).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlingRef {
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlingStatus {
    /// A number or a string; both encodings of the same status must compare equal once stored.
    pub id: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlingDiscount {
    pub valor: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlingItem {
    pub codigo: Option<String>,
    pub quantidade: Option<i64>,
    pub valor: Option<f64>,
    pub descricao: Option<String>,
}
