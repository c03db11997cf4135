mod common;

use common::*;
use http::StatusCode;
use order_server::{Config, ServerState, build_app};
use order_server::auth::JwtConfig;
use order_server::db::repository::{password_reset as reset_repo, user as user_repo};
use order_server::services::accounts;
use order_server::utils::ErrorCode;
use shared::models::{CARGO_ADMIN, CARGO_COURIER};
use shared::util::now_millis;

#[tokio::test]
async fn test_login_then_me() {
    let (state, app) = test_app().await;
    order_server::services::accounts::create_account(
        &state,
        "lucas@nortegas.com",
        "senha-forte",
        None,
        "",
    )
    .await
    .unwrap();

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(serde_json::json!({ "email": "lucas@nortegas.com", "password": "errada" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(serde_json::json!({ "email": "lucas@nortegas.com", "password": "senha-forte" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["nome"], "lucas");
    let token = body["token"].as_str().unwrap().to_string();

    let (status, me) = send(&app, request("GET", "/api/auth/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "lucas@nortegas.com");
    assert_eq!(me["cargo"], "");

    let (status, body) = send(&app, request("POST", "/api/auth/logout", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
}

#[tokio::test]
async fn test_password_reset_request_never_reveals_accounts() {
    let (_state, app) = test_app().await;
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/password-reset",
            None,
            Some(serde_json::json!({ "email": "ninguem@nortegas.com" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/password-reset/confirm",
            None,
            Some(serde_json::json!({ "token": "forjado", "new_password": "nova-senha" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1010);
}

#[tokio::test]
async fn test_user_admin_requires_admin_cargo() {
    let (state, app) = test_app().await;
    let (_, courier) = staff_token(&state, "moto@nortegas.com", CARGO_COURIER).await;
    let (_, admin) = staff_token(&state, "dono@nortegas.com", CARGO_ADMIN).await;

    let (status, body) = send(&app, request("GET", "/api/admin/users", Some(&courier), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2001);

    let (status, created) = send(
        &app,
        request(
            "POST",
            "/api/admin/users",
            Some(&admin),
            Some(serde_json::json!({
                "email": "nova@nortegas.com",
                "password": "senha-nova",
                "cargo": CARGO_COURIER
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{created}");
    assert_eq!(created["nome"], "nova");
    let user_id = created["user_id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/admin/users",
            Some(&admin),
            Some(serde_json::json!({ "email": "nova@nortegas.com", "password": "senha-nova" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8002);

    let (status, updated) = send(
        &app,
        request(
            "PUT",
            &format!("/api/admin/users/{user_id}/cargo"),
            Some(&admin),
            Some(serde_json::json!({ "cargo": CARGO_ADMIN })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["cargo"], CARGO_ADMIN);

    let (status, profiles) = send(&app, request("GET", "/api/admin/users", Some(&admin), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profiles.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_configured_admin_id_bypasses_cargo() {
    let state = test_state().await;
    let (user_id, token) = staff_token(&state, "suporte@nortegas.com", "").await;

    let mut config = Config::with_overrides(
        std::env::temp_dir().to_string_lossy(),
        0,
        JwtConfig::with_secret(TEST_SECRET),
    );
    config.admin_user_id = Some(user_id);
    let state = ServerState::with_db(config, state.db.clone());
    let app = build_app(&state);

    let (status, _) = send(&app, request("GET", "/api/admin/users", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_account_writes_on_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let state = file_state(dir.path()).await;

    let mut tasks = Vec::new();
    for i in 0..6 {
        let state = state.clone();
        tasks.push(tokio::spawn(async move {
            let email = if i % 2 == 0 {
                "dupla@nortegas.com".to_string()
            } else {
                format!("entregador{i}@nortegas.com")
            };
            accounts::create_account(&state, &email, "senha-segura", None, CARGO_COURIER).await
        }));
    }
    let mut created = 0;
    let mut duplicates = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => created += 1,
            Err(e) => {
                assert_eq!(e.code, ErrorCode::EmailAlreadyExists, "unexpected error: {e}");
                duplicates += 1;
            }
        }
    }
    assert_eq!((created, duplicates), (4, 2));

    let account = user_repo::find_by_email(&state.db.pool, "dupla@nortegas.com")
        .await
        .unwrap()
        .unwrap();
    reset_repo::insert(&state.db.pool, "token-unico", account.id, now_millis() + 60_000)
        .await
        .unwrap();

    let mut tasks = Vec::new();
    for i in 0..4 {
        let state = state.clone();
        tasks.push(tokio::spawn(async move {
            accounts::confirm_password_reset(&state, "token-unico", &format!("nova-senha-{i}")).await
        }));
    }
    let mut redeemed = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(()) => redeemed += 1,
            Err(e) => assert_eq!(e.code, ErrorCode::ResetTokenInvalid, "unexpected error: {e}"),
        }
    }
    assert_eq!(redeemed, 1);
}
