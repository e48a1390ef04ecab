//! Chat relay HTTP server
//!
//! Binds the listener and serves the relay routes until shut down.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::error::Result;
use crate::relay::{ChatRelay, RelayConfig};
use crate::server::config::ServerConfig;
use crate::server::routes;

/// Chat relay server
pub struct ChatServer {
    config: ServerConfig,
    relay: Arc<ChatRelay>,
}

impl ChatServer {
    /// Create a new server with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        Self::with_relay_config(config, RelayConfig::default())
    }

    /// Create a new server with custom relay configuration
    pub fn with_relay_config(config: ServerConfig, relay_config: RelayConfig) -> Self {
        Self::with_relay(config, Arc::new(ChatRelay::with_config(relay_config)))
    }

    /// Create a server around an existing relay
    pub fn with_relay(config: ServerConfig, relay: Arc<ChatRelay>) -> Self {
        Self { config, relay }
    }

    /// Get a reference to the relay
    pub fn relay(&self) -> &Arc<ChatRelay> {
        &self.relay
    }

    /// Get the bind address
    pub fn bind_addr(&self) -> SocketAddr {
        self.config.bind_addr
    }

    /// Run the server
    ///
    /// This method blocks until the server fails.
    pub async fn run(&self) -> Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Run the server with graceful shutdown
    ///
    /// When `shutdown` resolves, every open event stream is closed so that
    /// in-flight connections can finish.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(addr = %addr, "Chat relay listening");

        let app = routes::router(Arc::clone(&self.relay), &self.config);
        let relay = Arc::clone(&self.relay);

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutdown signal received");
                relay.shutdown();
            })
            .await;

        if let Err(ref e) = result {
            tracing::error!(error = %e, "Server error");
        }

        result.map_err(Into::into)
    }
}
