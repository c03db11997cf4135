//! Order listing and status transitions

use shared::message::{action, resource};
use shared::models::{Order, OrderQuery, OrderStatus};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::core::ServerState;
use crate::db::repository::{RepoError, order as order_repo};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Orders newest first, narrowed by the query's search term and status.
pub async fn list_orders(pool: &SqlitePool, query: &OrderQuery) -> AppResult<Vec<Order>> {
    let status = query.status_filter().map_err(|e| {
        AppError::with_message(ErrorCode::InvalidFormat, e.to_string()).with_detail("field", "status")
    })?;
    let orders = order_repo::find_all(pool).await?;
    Ok(orders
        .into_iter()
        .filter(|order| query.matches(order, status))
        .collect())
}

pub async fn get_order(pool: &SqlitePool, id: i64) -> AppResult<Order> {
    order_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("id", id))
}

/// Set an order's status.
///
/// `delivery_date` is stamped when the order becomes delivered and cleared
/// for every other status.
pub async fn update_status(state: &ServerState, id: i64, status: OrderStatus) -> AppResult<Order> {
    let delivery_date = (status == OrderStatus::Delivered).then(now_millis);
    let order = match order_repo::update_status(&state.db.pool, id, status, delivery_date).await {
        Ok(order) => order,
        Err(RepoError::NotFound(_)) => {
            return Err(AppError::new(ErrorCode::OrderNotFound).with_detail("id", id));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        order_id = order.id,
        order_number = order.order_number,
        status = %order.status,
        "Order status updated"
    );
    state
        .broadcast_sync(resource::ORDER, action::UPDATED, &order.id.to_string(), Some(&order))
        .await;
    Ok(order)
}

/// Move an order one step along its lifecycle.
pub async fn advance_status(state: &ServerState, id: i64) -> AppResult<Order> {
    let current = get_order(&state.db.pool, id).await?;
    let next = current.status.next().ok_or_else(|| {
        AppError::new(ErrorCode::OrderAlreadyDelivered).with_detail("id", id)
    })?;
    update_status(state, id, next).await
}
