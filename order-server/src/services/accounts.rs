//! Account flows
//!
//! Login, staff account creation, the startup admin bootstrap and the
//! password reset round trip. Handlers stay thin and call in here.

use std::time::Duration;

use shared::client::{AuthSession, LoginRequest, LoginResponse};
use shared::message::{action, resource};
use shared::models::{CARGO_ADMIN, Profile, display_name_from_email};
use shared::util::now_millis;

use crate::core::ServerState;
use crate::db::repository::{
    RepoError, password_reset as reset_repo, profile as profile_repo, user as user_repo,
};
use crate::db::repository::user::UserAccount;
use crate::security_log;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_password,
    validate_text_len,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Fixed delay for authentication to prevent timing attacks
pub const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Lifetime of a password reset token
pub const RESET_TOKEN_TTL_MS: i64 = 30 * 60 * 1000;

const INVALID_LOGIN: &str = "Invalid email or password";

/// Check credentials and issue a token.
///
/// Unknown email and wrong password produce the same error after the same
/// delay.
pub async fn login(state: &ServerState, req: &LoginRequest) -> AppResult<LoginResponse> {
    let email = req.email.trim();
    let account = user_repo::find_by_email(&state.db.pool, email).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match account {
        Some(a) => a,
        None => {
            security_log!("WARN", "login_failed", email = email.to_string(), reason = "user_not_found");
            return Err(AppError::with_message(ErrorCode::InvalidCredentials, INVALID_LOGIN));
        }
    };

    if !account.is_active {
        security_log!("WARN", "login_failed", user_id = account.id, reason = "account_disabled");
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let password_valid = account
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !password_valid {
        security_log!("WARN", "login_failed", user_id = account.id, reason = "invalid_credentials");
        return Err(AppError::with_message(ErrorCode::InvalidCredentials, INVALID_LOGIN));
    }

    let profile = profile_repo::get_or_create_default(&state.db.pool, account.id, &account.email).await?;

    let jwt = state.get_jwt_service();
    let token = jwt
        .generate_token(account.id, &account.email, &profile.cargo)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = account.id,
        email = %account.email,
        cargo = %profile.cargo,
        "User logged in successfully"
    );

    Ok(LoginResponse {
        token,
        expires_in: jwt.expires_in_seconds(),
        session: AuthSession::from(profile),
    })
}

/// Current session view, read fresh from the profile table
pub async fn session(state: &ServerState, user_id: i64, email: &str) -> AppResult<AuthSession> {
    let profile = profile_repo::get_or_create_default(&state.db.pool, user_id, email).await?;
    Ok(AuthSession::from(profile))
}

/// Create an account and its profile in one transaction.
pub async fn create_account(
    state: &ServerState,
    email: &str,
    password: &str,
    nome: Option<&str>,
    cargo: &str,
) -> AppResult<Profile> {
    let email = email.trim();
    validate_email(email)?;
    validate_password(password)?;
    let nome = nome.map(str::trim).filter(|n| !n.is_empty());
    if let Some(nome) = nome {
        validate_text_len(nome, "nome", MAX_NAME_LEN)?;
    }
    validate_text_len(cargo, "cargo", MAX_SHORT_TEXT_LEN)?;

    let hash = UserAccount::hash_password(password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let mut tx = state.db.begin_immediate().await.map_err(RepoError::from)?;
    let account = match user_repo::create(&mut *tx, email, &hash).await {
        Ok(a) => a,
        Err(RepoError::Duplicate(msg)) => {
            return Err(AppError::with_message(ErrorCode::EmailAlreadyExists, msg));
        }
        Err(e) => return Err(e.into()),
    };
    let profile = Profile {
        user_id: account.id,
        nome: nome.map_or_else(|| display_name_from_email(&account.email), str::to_string),
        email: account.email.clone(),
        avatar: String::new(),
        cargo: cargo.trim().to_string(),
    };
    profile_repo::insert(&mut *tx, &profile).await?;
    tx.commit().await.map_err(RepoError::from)?;

    security_log!("INFO", "account_created", user_id = profile.user_id, cargo = profile.cargo.clone());
    state
        .broadcast_sync(resource::PROFILE, action::CREATED, &profile.user_id.to_string(), Some(&profile))
        .await;
    Ok(profile)
}

/// Create the configured admin account when it does not exist yet.
///
/// Returns the new profile, or `None` when nothing was configured or the
/// account was already there.
pub async fn bootstrap_admin(state: &ServerState) -> AppResult<Option<Profile>> {
    let (Some(email), Some(password)) = (&state.config.admin_email, &state.config.admin_password)
    else {
        return Ok(None);
    };
    if user_repo::find_by_email(&state.db.pool, email).await?.is_some() {
        tracing::debug!(email = %email, "Admin account already present");
        return Ok(None);
    }
    let profile = create_account(state, email, password, None, CARGO_ADMIN).await?;
    tracing::info!(user_id = profile.user_id, email = %profile.email, "Admin account bootstrapped");
    Ok(Some(profile))
}

/// Issue a reset token for a known, active account.
///
/// Unknown emails are silently ignored so callers cannot enumerate accounts.
pub async fn request_password_reset(state: &ServerState, email: &str) -> AppResult<()> {
    let email = email.trim();
    validate_text_len(email, "email", MAX_EMAIL_LEN)?;

    let Some(account) = user_repo::find_by_email(&state.db.pool, email).await? else {
        security_log!("INFO", "password_reset_unknown_email", email = email.to_string());
        return Ok(());
    };
    if !account.is_active {
        return Ok(());
    }

    let token = uuid::Uuid::new_v4().simple().to_string();
    let expires_at = now_millis() + RESET_TOKEN_TTL_MS;
    reset_repo::insert(&state.db.pool, &token, account.id, expires_at).await?;
    state
        .reset_notifier
        .send_reset(&account.email, &token, expires_at)
        .await;
    Ok(())
}

/// Redeem a reset token and store the new password hash.
pub async fn confirm_password_reset(
    state: &ServerState,
    token: &str,
    new_password: &str,
) -> AppResult<()> {
    validate_password(new_password)?;
    let hash = UserAccount::hash_password(new_password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let mut tx = state.db.begin_immediate().await.map_err(RepoError::from)?;
    let user_id = reset_repo::consume(&mut *tx, token.trim(), now_millis())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ResetTokenInvalid))?;
    user_repo::update_password(&mut *tx, user_id, &hash).await?;
    tx.commit().await.map_err(RepoError::from)?;

    security_log!("INFO", "password_reset_completed", user_id = user_id);
    Ok(())
}
