//! Conversion of Bling order payloads into normalized engine records.
//!
//! The mapping is total and defensive: a missing sub-object degrades to an absent column value.
//! The conversion only fails when the payload cannot produce a usable record at all, which means
//! one of:
//! * no order id (the natural key that all idempotency hangs off),
//! * no order total,
//! * a line item without a sku (the `(order, sku)` uniqueness invariant cannot hold for it).

use bling_sync_engine::db_types::{BlingId, NewLineItem, NewOrder};
use log::trace;
use serde_json::Value;
use thiserror::Error;

use crate::bling_event::{BlingItem, BlingOrderDetails};

/// The source's "no date" sentinel.
const ZERO_DATE: &str = "0000-00-00";

#[derive(Debug, Clone, Error)]
#[error("Could not convert the Bling payload into an order record. {0}")]
pub struct OrderConversionError(pub String);

/// Maps the loosely-typed order details into a normalized order record and its line items.
///
/// Line items carry no parent reference here; the store attaches the internal order id after the
/// parent row has been upserted, inside the same transaction.
pub fn new_order_from_event(
    details: BlingOrderDetails,
) -> Result<(NewOrder, Vec<NewLineItem>), OrderConversionError> {
    trace!("Converting Bling order details to a new order record: {details:?}");
    let bling_id = details
        .id
        .as_ref()
        .and_then(json_id_to_string)
        .map(BlingId::from)
        .ok_or_else(|| OrderConversionError("The order payload carries no order id".to_string()))?;
    let total_value = details
        .total
        .ok_or_else(|| OrderConversionError(format!("Order {bling_id} carries no total value")))?;
    let order = NewOrder {
        bling_id,
        order_number: details.numero,
        store_id: details.loja.and_then(|r| r.id),
        invoice_id: details.nota_fiscal.and_then(|r| r.id),
        order_date: normalize_date(details.data),
        ship_date: normalize_date(details.data_saida),
        delivery_date: normalize_date(details.data_prevista),
        total_value,
        status_id: details.situacao.and_then(|s| s.id.as_ref().and_then(json_id_to_string)),
        discount_value: details.desconto.and_then(|d| d.valor),
    };
    let items = details.itens.into_iter().map(line_item_from_event).collect::<Result<Vec<_>, _>>()?;
    Ok((order, items))
}

fn line_item_from_event(item: BlingItem) -> Result<NewLineItem, OrderConversionError> {
    let sku = item.codigo.ok_or_else(|| OrderConversionError("A line item carries no sku".to_string()))?;
    Ok(NewLineItem {
        sku,
        quantity: item.quantidade,
        unit_value: item.valor,
        description: item.descricao,
    })
}

/// Dates pass through untouched, except for the source's two "no date" encodings, the empty
/// string and the all-zero calendar date, which become absent. No other parsing or validation
/// happens at this layer.
fn normalize_date(date: Option<String>) -> Option<String> {
    date.filter(|d| !d.is_empty() && d != ZERO_DATE)
}

/// The source encodes identifiers as either JSON numbers or strings. Both are reduced to the
/// number's canonical string representation so that differently-encoded redeliveries compare
/// equal in the store.
fn json_id_to_string(id: &Value) -> Option<String> {
    match id {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bling_event::BlingEvent;

    fn details_from(payload: &str) -> BlingOrderDetails {
        serde_json::from_str::<BlingEvent>(payload).unwrap().data
    }

    #[test]
    fn scenario_payload_maps_to_normalized_records() {
        let details = details_from(
            r#"{"event":"order.created","data":{"id":100,"numero":"A1","loja":{"id":5},
                "total":199.90,"situacao":{"id":3},
                "itens":[{"codigo":"SKU1","quantidade":2,"valor":99.95,"descricao":"Widget"}]}}"#,
        );
        let (order, items) = new_order_from_event(details).unwrap();
        assert_eq!(order.bling_id, BlingId::from(100));
        assert_eq!(order.order_number.as_deref(), Some("A1"));
        assert_eq!(order.store_id, Some(5));
        assert_eq!(order.invoice_id, None);
        assert_eq!(order.total_value, 199.90);
        assert_eq!(order.status_id.as_deref(), Some("3"));
        assert_eq!(order.discount_value, None);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].sku, "SKU1");
        assert_eq!(items[0].quantity, Some(2));
        assert_eq!(items[0].unit_value, Some(99.95));
        assert_eq!(items[0].description.as_deref(), Some("Widget"));
    }

    #[test]
    fn numeric_and_string_statuses_store_the_same_value() {
        let number = details_from(r#"{"event":"order.updated","data":{"id":1,"total":1.0,"situacao":{"id":7}}}"#);
        let string = details_from(r#"{"event":"order.updated","data":{"id":1,"total":1.0,"situacao":{"id":"7"}}}"#);
        let (from_number, _) = new_order_from_event(number).unwrap();
        let (from_string, _) = new_order_from_event(string).unwrap();
        assert_eq!(from_number.status_id.as_deref(), Some("7"));
        assert_eq!(from_number.status_id, from_string.status_id);
    }

    #[test]
    fn numeric_and_string_order_ids_store_the_same_key() {
        let number = details_from(r#"{"event":"order.updated","data":{"id":100,"total":1.0}}"#);
        let string = details_from(r#"{"event":"order.updated","data":{"id":"100","total":1.0}}"#);
        let (a, _) = new_order_from_event(number).unwrap();
        let (b, _) = new_order_from_event(string).unwrap();
        assert_eq!(a.bling_id, b.bling_id);
    }

    #[test]
    fn zero_dates_normalize_to_absent() {
        let details = details_from(
            r#"{"event":"order.updated","data":{"id":1,"total":1.0,
                "data":"0000-00-00","dataSaida":"","dataPrevista":"2024-06-01"}}"#,
        );
        let (order, _) = new_order_from_event(details).unwrap();
        assert_eq!(order.order_date, None);
        assert_eq!(order.ship_date, None);
        assert_eq!(order.delivery_date.as_deref(), Some("2024-06-01"));
    }

    #[test]
    fn missing_sub_objects_degrade_to_absent_values() {
        let details = details_from(r#"{"event":"order.created","data":{"id":42,"total":10.0}}"#);
        let (order, items) = new_order_from_event(details).unwrap();
        assert_eq!(order.store_id, None);
        assert_eq!(order.invoice_id, None);
        assert_eq!(order.status_id, None);
        assert_eq!(order.discount_value, None);
        assert!(items.is_empty());
    }

    #[test]
    fn missing_order_id_is_an_error() {
        let details = details_from(r#"{"event":"order.created","data":{"total":10.0}}"#);
        let err = new_order_from_event(details).unwrap_err();
        assert!(err.to_string().contains("no order id"));
    }

    #[test]
    fn missing_total_is_an_error() {
        let details = details_from(r#"{"event":"order.created","data":{"id":1}}"#);
        let err = new_order_from_event(details).unwrap_err();
        assert!(err.to_string().contains("no total value"));
    }

    #[test]
    fn item_without_sku_is_an_error() {
        let details = details_from(
            r#"{"event":"order.created","data":{"id":1,"total":10.0,"itens":[{"quantidade":1}]}}"#,
        );
        let err = new_order_from_event(details).unwrap_err();
        assert!(err.to_string().contains("no sku"));
    }

    #[test]
    fn discount_comes_from_the_nested_value_field() {
        let details = details_from(
            r#"{"event":"order.updated","data":{"id":1,"total":10.0,"desconto":{"valor":2.5}}}"#,
        );
        let (order, _) = new_order_from_event(details).unwrap();
        assert_eq!(order.discount_value, Some(2.5));
    }
}
