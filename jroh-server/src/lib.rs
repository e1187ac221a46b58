//! JSON-RPC 2.0 dispatcher served over HTTP
//!
//! This crate turns a set of method handlers into an HTTP service: clients
//! POST a JSON-RPC 2.0 document (a single call object or a batch array) to
//! one endpoint, and the dispatcher validates it, resolves methods against
//! an immutable registry, executes handlers, and answers with JSON-RPC 2.0
//! envelopes. Protocol faults are always reported inside the JSON body with
//! HTTP 200; the HTTP layer itself never signals JSON-RPC failures.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use jroh_server::{methods, from_typed_fn, JrohServer};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct AddParams { a: i64, b: i64 }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = JrohServer::builder()
//!         .bind_str("127.0.0.1:10351")?
//!         .handler("time", methods::time())
//!         .handler("add", from_typed_fn(|p: AddParams| async move {
//!             Ok(p.a + p.b)
//!         }))
//!         .build()
//!         .await?;
//!
//!     server.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **Accept loop**: one Tokio task per connection; each serves HTTP/1.1
//!   requests through hyper
//! - **Dispatcher**: a cheap, cloneable context (registry handle plus call
//!   limits) shared by every connection; stateless between requests
//! - **Registry**: frozen at `build()`, read concurrently without locks
//!
//! A failing or malformed request only ever affects its own reply; the
//! process and sibling requests carry on.

mod builder;
mod dispatch;
mod handler;
mod http;
pub mod methods;
mod registry;

pub use builder::ServerBuilder;
pub use dispatch::{validate, Dispatcher};
pub use handler::{from_fn, from_typed_fn, AsyncHandler, Handler, HandlerResult};
pub use registry::{MethodRegistry, RegistryBuilder};

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use jroh_core::{Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Default port, kept from the protocol this server speaks natively.
pub const DEFAULT_PORT: u16 = 10351;

/// Default endpoint path clients POST to.
pub const DEFAULT_ENDPOINT: &str = "/api";

/// JSON-RPC 2.0 server over HTTP
///
/// Construct through [`JrohServer::builder`], then call [`run`] to start
/// accepting connections.
///
/// [`run`]: JrohServer::run
pub struct JrohServer {
    /// TCP listener accepting inbound connections
    listener: TcpListener,
    /// Shared dispatch context (registry plus limits)
    dispatcher: Dispatcher,
    /// Endpoint path; requests elsewhere get a plain 404
    endpoint: Arc<str>,
}

impl JrohServer {
    /// Create a new server builder.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Accept connections and serve requests until an accept error occurs.
    ///
    /// Each connection runs in its own task, so a slow or broken client
    /// never blocks the others.
    #[tracing::instrument(skip(self), name = "server.run")]
    pub async fn run(&self) -> Result<()> {
        tracing::info!("starting jroh server");
        let conn_counter = AtomicU64::new(0);

        loop {
            let (stream, peer) = self
                .listener
                .accept()
                .await
                .map_err(|e| Error::Io(e.to_string()))?;
            let conn_id = conn_counter.fetch_add(1, Ordering::SeqCst);
            let dispatcher = self.dispatcher.clone();
            let endpoint = Arc::clone(&self.endpoint);

            tracing::debug!(conn_id = conn_id, peer = %peer, "connection accepted");

            tokio::spawn(async move {
                let io = TokioIo::new(stream);
                let service = service_fn(move |req| {
                    let dispatcher = dispatcher.clone();
                    let endpoint = Arc::clone(&endpoint);
                    async move { http::handle_request(req, dispatcher, &endpoint, peer).await }
                });

                if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::debug!(conn_id = conn_id, peer = %peer, error = %e, "connection closed with error");
                }
            });
        }
    }

    /// The locally bound address.
    ///
    /// Useful to discover the actual port when binding port 0.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }
}
