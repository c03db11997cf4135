//! Password reset delivery
//!
//! The server never mails anything itself. A [`ResetNotifier`] receives the
//! one-time token and decides how it reaches the user.

use async_trait::async_trait;

#[async_trait]
pub trait ResetNotifier: Send + Sync + std::fmt::Debug {
    /// Hand over a freshly issued reset token for `email`
    async fn send_reset(&self, email: &str, token: &str, expires_at: i64);
}

/// Default notifier: writes the token to the `security` log target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingResetNotifier;

#[async_trait]
impl ResetNotifier for TracingResetNotifier {
    async fn send_reset(&self, email: &str, token: &str, expires_at: i64) {
        tracing::info!(
            target: "security",
            event = "password_reset_issued",
            email = %email,
            token = %token,
            expires_at,
            "Password reset token issued"
        );
    }
}
