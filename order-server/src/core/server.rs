//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::net::SocketAddr;
use std::time::Duration;

use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;

use crate::api::build_app;
use crate::core::{Config, Result, ServerError, ServerState};
use crate::services::accounts;

/// Grace period for in-flight requests on shutdown
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        if let Err(e) = accounts::bootstrap_admin(&state).await {
            tracing::error!("Admin bootstrap failed: {}", e);
        }

        let app = build_app(&state);
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));

        let handle = Handle::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
            shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        match self.config.tls_paths() {
            Some((cert, key)) => {
                let tls = RustlsConfig::from_pem_file(cert, key)
                    .await
                    .map_err(|e| ServerError::Config(format!("Failed to load TLS files: {e}")))?;
                tracing::info!("🔥 Gas order server listening on https://{}", addr);
                axum_server::bind_rustls(addr, tls)
                    .handle(handle)
                    .serve(app.into_make_service())
                    .await
                    .map_err(|e| ServerError::Internal(anyhow::anyhow!("Server error: {e}")))?;
            }
            None => {
                tracing::info!("🔥 Gas order server listening on http://{}", addr);
                axum_server::bind(addr)
                    .handle(handle)
                    .serve(app.into_make_service())
                    .await
                    .map_err(|e| ServerError::Internal(anyhow::anyhow!("Server error: {e}")))?;
            }
        }

        tracing::info!("Server stopped");
        Ok(())
    }
}
