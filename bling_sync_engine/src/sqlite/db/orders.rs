use sqlx::SqliteConnection;

use crate::{
    db_types::{BlingId, NewOrder, Order},
    traits::OrderSyncError,
};

/// Inserts the order, or updates every mutable field in place when the natural key already
/// exists. This is a single atomic conditional statement, keyed on the `bling_id` uniqueness
/// constraint, so concurrent redeliveries of the same order serialize at the database instead of
/// racing. `updated_at` is bumped on both paths.
///
/// Returns the stored row, including the internally assigned id. The statement always produces a
/// row; callers treat an empty result as an internal consistency failure.
pub async fn upsert_order(order: &NewOrder, conn: &mut SqliteConnection) -> Result<Option<Order>, OrderSyncError> {
    let row = sqlx::query_as(
        r#"
            INSERT INTO orders (
                bling_id,
                order_number,
                store_id,
                invoice_id,
                order_date,
                ship_date,
                delivery_date,
                total_value,
                status_id,
                discount_value,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, CURRENT_TIMESTAMP)
            ON CONFLICT (bling_id) DO UPDATE SET
                order_number = excluded.order_number,
                store_id = excluded.store_id,
                invoice_id = excluded.invoice_id,
                order_date = excluded.order_date,
                ship_date = excluded.ship_date,
                delivery_date = excluded.delivery_date,
                total_value = excluded.total_value,
                status_id = excluded.status_id,
                discount_value = excluded.discount_value,
                updated_at = CURRENT_TIMESTAMP
            RETURNING *;
        "#,
    )
    .bind(order.bling_id.as_str())
    .bind(order.order_number.as_deref())
    .bind(order.store_id)
    .bind(order.invoice_id)
    .bind(order.order_date.as_deref())
    .bind(order.ship_date.as_deref())
    .bind(order.delivery_date.as_deref())
    .bind(order.total_value)
    .bind(order.status_id.as_deref())
    .bind(order.discount_value)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

/// Returns the order row for the given Bling id, if any.
pub async fn fetch_order_by_bling_id(
    bling_id: &BlingId,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE bling_id = $1")
        .bind(bling_id.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(order)
}
