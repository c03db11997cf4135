//! Order Repository

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderStatus};
use sqlx::types::Json;
use sqlx::{SqliteExecutor, SqlitePool};

const ORDER_SELECT: &str = "SELECT id, order_number, customer, items, delivery_type, payment_method, needs_change, change_amount, notes, status, total_amount, created_at, delivery_date, source FROM orders";

/// All orders, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "{ORDER_SELECT} ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

pub async fn find_by_id<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!("{ORDER_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(order)
}

pub async fn order_number_exists<'e>(
    executor: impl SqliteExecutor<'e>,
    order_number: i64,
) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM orders WHERE order_number = ? LIMIT 1")
        .bind(order_number)
        .fetch_optional(executor)
        .await?;
    Ok(found.is_some())
}

/// Insert a fully built order. A taken `order_number` yields `RepoError::Duplicate`.
pub async fn insert<'e>(executor: impl SqliteExecutor<'e>, order: &Order) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO orders (id, order_number, customer, items, delivery_type, payment_method, needs_change, change_amount, notes, status, total_amount, created_at, delivery_date, source) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(order.id)
    .bind(order.order_number)
    .bind(Json(&order.customer))
    .bind(Json(&order.items))
    .bind(order.delivery_type)
    .bind(&order.payment_method)
    .bind(order.needs_change)
    .bind(&order.change_amount)
    .bind(&order.notes)
    .bind(order.status)
    .bind(order.total_amount)
    .bind(order.created_at)
    .bind(order.delivery_date)
    .bind(order.source)
    .execute(executor)
    .await?;
    Ok(())
}

/// Persist a status change together with its delivery date
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: OrderStatus,
    delivery_date: Option<i64>,
) -> RepoResult<Order> {
    let rows = sqlx::query("UPDATE orders SET status = ?, delivery_date = ? WHERE id = ?")
        .bind(status)
        .bind(delivery_date)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}
