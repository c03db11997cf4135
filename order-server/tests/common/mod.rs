#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use order_server::auth::JwtConfig;
use order_server::db::repository::product as product_repo;
use order_server::services::accounts;
use order_server::{Config, ServerState, build_app};
use serde_json::Value;
use shared::models::{Product, ProductCreate};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";

pub async fn test_state() -> ServerState {
    let config = Config::with_overrides(
        std::env::temp_dir().to_string_lossy(),
        0,
        JwtConfig::with_secret(TEST_SECRET),
    );
    ServerState::in_memory(config).await.unwrap()
}

/// State over a WAL file database in `work_dir`, with a real connection pool
pub async fn file_state(work_dir: &std::path::Path) -> ServerState {
    let config = Config::with_overrides(
        work_dir.to_string_lossy(),
        0,
        JwtConfig::with_secret(TEST_SECRET),
    );
    ServerState::initialize(&config).await.unwrap()
}

pub async fn test_app() -> (ServerState, Router) {
    let state = test_state().await;
    let app = build_app(&state);
    (state, app)
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, json)
}

/// Account with the given cargo plus a token for it, skipping the login delay
pub async fn staff_token(state: &ServerState, email: &str, cargo: &str) -> (i64, String) {
    let profile = accounts::create_account(state, email, "senha-segura", None, cargo)
        .await
        .unwrap();
    let token = state
        .get_jwt_service()
        .generate_token(profile.user_id, &profile.email, &profile.cargo)
        .unwrap();
    (profile.user_id, token)
}

pub async fn seed_product(
    state: &ServerState,
    name: &str,
    pickup_price: f64,
    delivery_price: f64,
    quantity: i64,
) -> Product {
    product_repo::create(
        &state.db.pool,
        ProductCreate {
            name: name.into(),
            weight: "13".into(),
            pickup_price,
            delivery_price,
            quantity: Some(quantity),
        },
    )
    .await
    .unwrap()
}

pub fn checkout_body(lines: &[(i64, i64)], delivery_type: &str, payment: &str) -> Value {
    serde_json::json!({
        "customer": {
            "name": "Maria Souza",
            "phone": "(32) 99144-0248",
            "address": {
                "street": "Rua das Flores",
                "number": "120",
                "neighborhood": "Centro",
                "city": "Juiz de Fora",
                "cep": "36010-000"
            }
        },
        "items": lines
            .iter()
            .map(|(id, qty)| serde_json::json!({ "product_id": id, "quantity": qty }))
            .collect::<Vec<_>>(),
        "delivery_type": delivery_type,
        "payment_method": payment,
        "needs_change": payment == "dinheiro",
        "change_amount": if payment == "dinheiro" { "200" } else { "" },
        "notes": ""
    })
}
