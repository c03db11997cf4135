//! Dashboard API
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/admin/dashboard | GET | 订单统计 (今日营业额按服务器本地日期) |

use axum::{Json, Router, extract::State, routing::get};
use chrono::Local;
use shared::models::OrderStats;

use crate::core::ServerState;
use crate::db::repository::order as order_repo;
use crate::orders::order_stats;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/admin/dashboard", get(stats))
}

async fn stats(State(state): State<ServerState>) -> AppResult<Json<OrderStats>> {
    let orders = order_repo::find_all(&state.db.pool).await?;
    Ok(Json(order_stats(&orders, &Local::now())))
}
