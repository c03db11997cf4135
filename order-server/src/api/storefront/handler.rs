//! Storefront API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use shared::models::{
    CheckoutRequest, CheckoutResponse, OrderSource, Product, ProductQuery, StorefrontInfo,
};

use crate::core::ServerState;
use crate::db::repository::product as product_repo;
use crate::orders;
use crate::utils::AppResult;

/// GET /api/storefront/info - 店铺信息
pub async fn info(State(state): State<ServerState>) -> Json<StorefrontInfo> {
    Json(StorefrontInfo {
        store_name: state.config.store_name.clone(),
        whatsapp_number: state.config.whatsapp_number.clone(),
        pix_key: state.config.pix_key.clone(),
    })
}

/// GET /api/storefront/products - 商品目录
pub async fn products(
    State(state): State<ServerState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product_repo::search(&state.db.pool, query.search.as_deref()).await?;
    Ok(Json(products))
}

/// POST /api/storefront/orders - 顾客下单
///
/// Takes stock out of the catalog and answers with the WhatsApp hand-off.
pub async fn checkout(
    State(state): State<ServerState>,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    let response = orders::checkout(&state, req, OrderSource::Storefront).await?;
    Ok(Json(response))
}
