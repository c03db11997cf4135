//! Checkout
//!
//! Validates a cart, snapshots products, draws an order number and stores
//! the order. Storefront orders also take the ordered units out of stock,
//! in the same transaction as the order insert.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::message::{action, resource};
use shared::models::{
    CheckoutLine, CheckoutRequest, CheckoutResponse, Order, OrderItem, OrderSource, OrderStatus,
    Product, ProductSnapshot,
};
use shared::util::{digits_only, now_millis, snowflake_id};

use super::money::compute_total;
use super::number::generate_unique_order_number;
use crate::core::ServerState;
use crate::db::repository::{RepoError, order as order_repo, product as product_repo};
use crate::messaging::{build_whatsapp_message, whatsapp_link};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_text_len,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Insert attempts: the first draw plus one retry after a UNIQUE violation
const INSERT_ATTEMPTS: usize = 2;

/// Normalize and validate a checkout request.
///
/// - name is trimmed, phone reduced to digits, both required
/// - lines with `quantity <= 0` are dropped, repeated products merged
/// - at least one line must remain
pub fn normalize_checkout(mut req: CheckoutRequest) -> AppResult<CheckoutRequest> {
    req.customer.name = req.customer.name.trim().to_string();
    req.customer.phone = digits_only(&req.customer.phone);
    if req.customer.name.is_empty() || req.customer.phone.is_empty() {
        return Err(AppError::new(ErrorCode::OrderCustomerIncomplete));
    }

    validate_text_len(&req.customer.name, "customer.name", MAX_NAME_LEN)?;
    validate_text_len(&req.customer.phone, "customer.phone", MAX_SHORT_TEXT_LEN)?;
    let address = &req.customer.address;
    validate_text_len(&address.street, "address.street", MAX_ADDRESS_LEN)?;
    validate_text_len(&address.number, "address.number", MAX_SHORT_TEXT_LEN)?;
    validate_text_len(&address.neighborhood, "address.neighborhood", MAX_ADDRESS_LEN)?;
    validate_text_len(&address.city, "address.city", MAX_ADDRESS_LEN)?;
    validate_text_len(&address.cep, "address.cep", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&address.complement, "address.complement", MAX_ADDRESS_LEN)?;
    validate_optional_text(&address.reference, "address.reference", MAX_ADDRESS_LEN)?;

    req.payment_method = req.payment_method.trim().to_lowercase();
    validate_text_len(&req.payment_method, "payment_method", MAX_SHORT_TEXT_LEN)?;
    validate_text_len(&req.change_amount, "change_amount", MAX_SHORT_TEXT_LEN)?;
    validate_text_len(&req.notes, "notes", MAX_NOTE_LEN)?;

    let mut merged: Vec<CheckoutLine> = Vec::with_capacity(req.items.len());
    for line in req.items.into_iter().filter(|l| l.quantity > 0) {
        match merged.iter_mut().find(|m| m.product_id == line.product_id) {
            Some(existing) => existing.quantity += line.quantity,
            None => merged.push(line),
        }
    }
    if merged.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    req.items = merged;

    Ok(req)
}

/// Place an order and return it with the WhatsApp hand-off.
pub async fn checkout(
    state: &ServerState,
    req: CheckoutRequest,
    source: OrderSource,
) -> AppResult<CheckoutResponse> {
    let req = normalize_checkout(req)?;
    let mut rng = StdRng::from_entropy();
    let order = place_order(state, &req, source, &mut rng).await?;

    tracing::info!(
        order_id = order.id,
        order_number = order.order_number,
        source = ?order.source,
        total = order.total_amount,
        "Order created"
    );

    state
        .broadcast_sync(resource::ORDER, action::CREATED, &order.id.to_string(), Some(&order))
        .await;
    if source == OrderSource::Storefront {
        broadcast_stock(state, &order.items).await;
    }

    let whatsapp_message = build_whatsapp_message(&order, &state.config.store_name);
    let whatsapp_url = whatsapp_link(&state.config.whatsapp_number, &whatsapp_message);

    Ok(CheckoutResponse {
        order,
        whatsapp_message,
        whatsapp_url,
    })
}

/// Push the post-checkout stock of each ordered product to the live feed.
async fn broadcast_stock(state: &ServerState, items: &[OrderItem]) {
    for item in items {
        match product_repo::find_by_id(&state.db.pool, item.product.id).await {
            Ok(Some(product)) => {
                state
                    .broadcast_sync(
                        resource::PRODUCT,
                        action::UPDATED,
                        &product.id.to_string(),
                        Some(&product),
                    )
                    .await;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    product_id = item.product.id,
                    error = %e,
                    "Failed to reload product for stock broadcast"
                );
            }
        }
    }
}

/// Store the order in one write transaction, drawing numbers from `rng`.
async fn place_order<R>(
    state: &ServerState,
    req: &CheckoutRequest,
    source: OrderSource,
    rng: &mut R,
) -> AppResult<Order>
where
    R: Rng + Send,
{
    for attempt in 1..=INSERT_ATTEMPTS {
        let mut tx = state.db.begin_immediate().await.map_err(RepoError::from)?;

        let mut products: HashMap<i64, Product> = HashMap::with_capacity(req.items.len());
        for line in &req.items {
            let product = product_repo::find_by_id(&mut *tx, line.product_id)
                .await?
                .ok_or_else(|| {
                    AppError::validation(format!("Unknown product {}", line.product_id))
                        .with_detail("product_id", line.product_id)
                })?;
            products.insert(product.id, product);
        }

        let items: Vec<OrderItem> = req
            .items
            .iter()
            .filter_map(|line| {
                products.get(&line.product_id).map(|p| OrderItem {
                    product: ProductSnapshot::from(p),
                    quantity: line.quantity,
                })
            })
            .collect();

        let order = Order {
            id: snowflake_id(),
            order_number: generate_unique_order_number(&mut tx, rng).await?,
            customer: req.customer.clone(),
            items,
            delivery_type: req.delivery_type,
            payment_method: req.payment_method.clone(),
            needs_change: req.needs_change,
            change_amount: req.change_amount.clone(),
            notes: req.notes.clone(),
            status: OrderStatus::Pending,
            total_amount: compute_total(&req.items, &products, req.delivery_type),
            created_at: now_millis(),
            delivery_date: None,
            source,
        };

        match order_repo::insert(&mut *tx, &order).await {
            Ok(()) => {}
            Err(RepoError::Duplicate(msg)) if attempt < INSERT_ATTEMPTS => {
                // Lost a race for the number; the dropped tx rolls back
                tracing::warn!(order_number = order.order_number, %msg, "Order insert collided, retrying");
                continue;
            }
            Err(RepoError::Duplicate(_)) => {
                return Err(AppError::new(ErrorCode::OrderNumberExhausted));
            }
            Err(e) => return Err(e.into()),
        }

        if source == OrderSource::Storefront {
            for item in &order.items {
                product_repo::decrement_stock(&mut *tx, item.product.id, item.quantity).await?;
            }
        }

        tx.commit().await.map_err(RepoError::from)?;
        return Ok(order);
    }

    Err(AppError::new(ErrorCode::OrderNumberExhausted))
}
