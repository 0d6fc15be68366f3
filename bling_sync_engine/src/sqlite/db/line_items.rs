use sqlx::SqliteConnection;

use crate::{
    db_types::{LineItem, NewLineItem},
    traits::OrderSyncError,
};

/// Inserts the line item for the given (internal) order id, or updates quantity, value and
/// description in place when the `(order_id, sku)` pair already exists. Line items are only ever
/// written from inside the transaction that upserted their parent order.
pub async fn upsert_line_item(
    order_id: i64,
    item: &NewLineItem,
    conn: &mut SqliteConnection,
) -> Result<LineItem, OrderSyncError> {
    let row = sqlx::query_as(
        r#"
            INSERT INTO line_items (order_id, sku, quantity, unit_value, description)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (order_id, sku) DO UPDATE SET
                quantity = excluded.quantity,
                unit_value = excluded.unit_value,
                description = excluded.description
            RETURNING *;
        "#,
    )
    .bind(order_id)
    .bind(item.sku.as_str())
    .bind(item.quantity)
    .bind(item.unit_value)
    .bind(item.description.as_deref())
    .fetch_one(conn)
    .await?;
    Ok(row)
}

/// Returns the line items for the given (internal) order id, ordered by sku.
pub async fn fetch_line_items_for_order(
    order_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<LineItem>, sqlx::Error> {
    let items = sqlx::query_as("SELECT * FROM line_items WHERE order_id = $1 ORDER BY sku")
        .bind(order_id)
        .fetch_all(conn)
        .await?;
    Ok(items)
}
