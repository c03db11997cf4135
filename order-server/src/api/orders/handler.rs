//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{
    CheckoutRequest, CheckoutResponse, Order, OrderQuery, OrderSource, StatusUpdateRequest,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders;
use crate::utils::AppResult;

/// GET /api/admin/orders?search=&status= - 订单列表 (最新在前)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = orders::list_orders(&state.db.pool, &query).await?;
    Ok(Json(orders))
}

/// POST /api/admin/orders - 员工代客下单 (不扣库存)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    let response = orders::checkout(&state, req, OrderSource::Staff).await?;
    tracing::info!(
        user_id = user.id,
        order_number = response.order.order_number,
        "Staff order registered"
    );
    Ok(Json(response))
}

/// GET /api/admin/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = orders::get_order(&state.db.pool, id).await?;
    Ok(Json(order))
}

/// PUT /api/admin/orders/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<StatusUpdateRequest>,
) -> AppResult<Json<Order>> {
    let order = orders::update_status(&state, id, req.status).await?;
    Ok(Json(order))
}

/// POST /api/admin/orders/{id}/advance - 推进到下一状态
pub async fn advance(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = orders::advance_status(&state, id).await?;
    Ok(Json(order))
}
