//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::message::{action, resource};
use shared::models::{Product, ProductCreate, ProductQuery, ProductUpdate};

use crate::core::ServerState;
use crate::db::repository::{RepoError, product as product_repo};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_price, validate_required_text, validate_text_len,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn product_not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::ProductNotFound).with_detail("id", id)
}

fn validate_create(data: &mut ProductCreate) -> AppResult<()> {
    data.name = data.name.trim().to_string();
    data.weight = data.weight.trim().to_string();
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_text_len(&data.weight, "weight", MAX_SHORT_TEXT_LEN)?;
    validate_price(data.pickup_price, "pickup_price")?;
    validate_price(data.delivery_price, "delivery_price")?;
    Ok(())
}

fn validate_update(data: &mut ProductUpdate) -> AppResult<()> {
    if let Some(name) = data.name.as_mut() {
        *name = name.trim().to_string();
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(weight) = data.weight.as_mut() {
        *weight = weight.trim().to_string();
        validate_text_len(weight, "weight", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(price) = data.pickup_price {
        validate_price(price, "pickup_price")?;
    }
    if let Some(price) = data.delivery_price {
        validate_price(price, "delivery_price")?;
    }
    Ok(())
}

/// GET /api/admin/products?search= - 商品列表 (含库存)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product_repo::search(&state.db.pool, query.search.as_deref()).await?;
    Ok(Json(products))
}

/// GET /api/admin/products/{id} - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let product = product_repo::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    Ok(Json(product))
}

/// POST /api/admin/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_create(&mut payload)?;
    let product = product_repo::create(&state.db.pool, payload).await?;

    tracing::info!(product_id = product.id, name = %product.name, "Product created");
    state
        .broadcast_sync(resource::PRODUCT, action::CREATED, &product.id.to_string(), Some(&product))
        .await;
    Ok(Json(product))
}

/// PUT /api/admin/products/{id} - 部分更新商品 (含库存)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    validate_update(&mut payload)?;
    let product = match product_repo::update(&state.db.pool, id, payload).await {
        Ok(p) => p,
        Err(RepoError::NotFound(_)) => return Err(product_not_found(id)),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(product_id = product.id, quantity = product.quantity, "Product updated");
    state
        .broadcast_sync(resource::PRODUCT, action::UPDATED, &product.id.to_string(), Some(&product))
        .await;
    Ok(Json(product))
}

/// DELETE /api/admin/products/{id} - 删除商品
///
/// Orders keep their own product snapshots, so history is unaffected.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if !product_repo::delete(&state.db.pool, id).await? {
        return Err(product_not_found(id));
    }

    tracing::info!(product_id = id, "Product deleted");
    state
        .broadcast_sync::<Product>(resource::PRODUCT, action::DELETED, &id.to_string(), None)
        .await;
    Ok(Json(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_payload(name: &str, pickup: f64, delivery: f64) -> ProductCreate {
        ProductCreate {
            name: name.into(),
            weight: " 13 ".into(),
            pickup_price: pickup,
            delivery_price: delivery,
            quantity: Some(10),
        }
    }

    #[test]
    fn test_create_trims_and_accepts_valid() {
        let mut payload = create_payload("  Botijão P13 ", 100.0, 110.0);
        validate_create(&mut payload).unwrap();
        assert_eq!(payload.name, "Botijão P13");
        assert_eq!(payload.weight, "13");
    }

    #[test]
    fn test_create_rejects_blank_name_and_bad_prices() {
        assert!(validate_create(&mut create_payload("   ", 1.0, 1.0)).is_err());
        let err = validate_create(&mut create_payload("P13", -1.0, 1.0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductInvalidPrice);
        let err = validate_create(&mut create_payload("P13", 1.0, f64::NAN)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductInvalidPrice);
    }

    #[test]
    fn test_update_only_checks_present_fields() {
        let mut empty = ProductUpdate::default();
        validate_update(&mut empty).unwrap();

        let mut stock_only = ProductUpdate {
            quantity: Some(-3),
            ..Default::default()
        };
        validate_update(&mut stock_only).unwrap();

        let mut bad = ProductUpdate {
            delivery_price: Some(f64::INFINITY),
            ..Default::default()
        };
        assert!(validate_update(&mut bad).is_err());
    }
}
