//! Server Implementation
//!
//! HTTP 服务器启动和优雅关闭

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::api;
use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server around an initialized state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> Result<()> {
        let addr = self
            .config
            .bind_addr()
            .map_err(|e| ServerError::InvalidAddress(e.to_string()))?;
        let listener = TcpListener::bind(addr).await.map_err(ServerError::Bind)?;

        api::health::mark_started();
        tracing::info!(%addr, environment = %self.config.environment, "Booking server listening");

        let app = api::build_app(self.state.clone());
        let stopping = Arc::new(Notify::new());
        let signal = {
            let stopping = stopping.clone();
            async move {
                shutdown_signal().await;
                tracing::info!("Shutting down...");
                stopping.notify_one();
            }
        };

        let mut server = tokio::spawn(
            axum::serve(listener, app)
                .with_graceful_shutdown(signal)
                .into_future(),
        );

        tokio::select! {
            joined = &mut server => return flatten(joined),
            _ = stopping.notified() => {}
        }

        // In-flight requests get `shutdown_timeout` to finish
        match tokio::time::timeout(self.config.shutdown_timeout(), &mut server).await {
            Ok(joined) => flatten(joined),
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.config.shutdown_timeout_ms,
                    "Graceful shutdown timed out, aborting open connections"
                );
                server.abort();
                Ok(())
            }
        }
    }
}

fn flatten(
    joined: std::result::Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<()> {
    match joined {
        Ok(Ok(())) => {
            tracing::info!("Server stopped");
            Ok(())
        }
        Ok(Err(e)) => Err(ServerError::Internal(e.into())),
        Err(e) => Err(ServerError::Internal(e.into())),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
