//! Server builder
//!
//! The builder is the only place configuration enters the server: bind
//! address, endpoint path, method registrations and dispatch limits. Once
//! `build()` returns, the registry is frozen and the server is bound.
//!
//! # Examples
//!
//! ```rust,no_run
//! use jroh_server::{methods, from_fn, JrohServer};
//! use std::time::Duration;
//!
//! # async fn example() -> jroh_core::Result<()> {
//! let server = JrohServer::builder()
//!     .bind_str("127.0.0.1:10351")?
//!     .handler("time", methods::time())
//!     .handler("ping", from_fn(|_| async { Ok(serde_json::json!("pong")) }))
//!     .call_timeout(Duration::from_secs(5))
//!     .max_batch_size(100)
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use jroh_core::{Error, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::dispatch::Dispatcher;
use crate::handler::Handler;
use crate::registry::RegistryBuilder;
use crate::{JrohServer, DEFAULT_ENDPOINT, DEFAULT_PORT};

/// Builder for [`JrohServer`]
pub struct ServerBuilder {
    addr: Option<SocketAddr>,
    endpoint: String,
    registry: RegistryBuilder,
    call_timeout: Option<Duration>,
    max_batch_size: Option<usize>,
}

impl ServerBuilder {
    /// Create a builder with the default endpoint path and no handlers.
    pub fn new() -> Self {
        Self {
            addr: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            registry: RegistryBuilder::new(),
            call_timeout: None,
            max_batch_size: None,
        }
    }

    /// Set the bind address.
    pub fn bind(mut self, addr: impl Into<SocketAddr>) -> Self {
        self.addr = Some(addr.into());
        self
    }

    /// Set the bind address from a string (e.g. "127.0.0.1:10351").
    pub fn bind_str(mut self, addr: &str) -> Result<Self> {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|e| Error::Io(format!("invalid address: {}", e)))?;
        self.addr = Some(addr);
        Ok(self)
    }

    /// Set the endpoint path clients POST to (default `/api`).
    pub fn endpoint(mut self, path: impl Into<String>) -> Self {
        self.endpoint = path.into();
        self
    }

    /// Register a handler for a method.
    pub fn handler(mut self, method: impl Into<String>, handler: Box<dyn Handler>) -> Self {
        self.registry = self.registry.register(method, handler);
        self
    }

    /// Set a per-call time budget. Handlers that run past it answer with a
    /// server error (-32000) instead of blocking the request forever.
    pub fn call_timeout(mut self, budget: Duration) -> Self {
        self.call_timeout = Some(budget);
        self
    }

    /// Cap the number of calls accepted in one batch (default: unlimited).
    pub fn max_batch_size(mut self, max_size: usize) -> Self {
        self.max_batch_size = Some(max_size);
        self
    }

    /// Freeze the registry, bind the listener and return the server.
    ///
    /// With no explicit address the server binds `127.0.0.1` on the
    /// default port.
    pub async fn build(self) -> Result<JrohServer> {
        let addr = self
            .addr
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)));

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Io(e.to_string()))?;

        let registry = Arc::new(self.registry.build());
        let dispatcher = Dispatcher::with_limits(registry, self.call_timeout, self.max_batch_size);

        tracing::info!(addr = %addr, endpoint = %self.endpoint, "server bound");

        Ok(JrohServer {
            listener,
            dispatcher,
            endpoint: Arc::from(self.endpoint),
        })
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
