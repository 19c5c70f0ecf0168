//! HTTP server lifecycle
//!
//! Bind, serve, and on SIGINT/SIGTERM stop accepting connections while
//! in-flight requests drain for at most the shutdown timeout.

use std::future::IntoFuture;
use std::time::Duration;

use anyhow::Context as _;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;

// =============================================================================
// Configuration
// =============================================================================

const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    shutdown_timeout: Duration,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }

    pub fn with_shutdown_timeout(self, shutdown_timeout: Duration) -> Self {
        Self {
            shutdown_timeout,
            ..self
        }
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }
}

// =============================================================================
// Server
// =============================================================================

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub async fn run(self, router: Router) -> anyhow::Result<()> {
        let address = self.config.socket_addr();

        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("failed to bind {address}"))?;

        tracing::info!(address = %address, "server listening");

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let serve = axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = shutdown_tx.send(true);
            })
            .into_future();

        tokio::select! {
            result = serve => result.context("server error")?,
            () = drain_deadline(shutdown_rx, self.config.shutdown_timeout) => {
                tracing::warn!(
                    timeout_secs = self.config.shutdown_timeout.as_secs(),
                    "shutdown timeout elapsed, abandoning in-flight requests"
                );
            }
        }

        tracing::info!("server shutdown complete");

        Ok(())
    }
}

/// Resolves `timeout` after the shutdown signal, never if it doesn't come
async fn drain_deadline(mut shutdown: watch::Receiver<bool>, timeout: Duration) {
    let signalled = shutdown.wait_for(|requested| *requested).await.is_ok();
    if !signalled {
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(timeout).await;
}

// =============================================================================
// Shutdown Signal
// =============================================================================

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(error = %error, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!(error = %error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, initiating graceful shutdown");
        }
    }
}
