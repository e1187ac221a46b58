//! JROH - JSON-RPC 2.0 Over HTTP
//!
//! This is the convenience crate that re-exports the JROH sub-crates:
//!
//! - **jroh-core**: wire types, error taxonomy, codec
//! - **jroh-server**: method registry, dispatcher and HTTP transport
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jroh::JrohServer;
//! use jroh::server::{from_typed_fn, methods};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct AddParams { a: i64, b: i64 }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = JrohServer::builder()
//!         .bind_str("0.0.0.0:10351")?
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
//! Clients POST a single call object or a batch array to `/api` and always
//! receive HTTP 200; failures are JSON-RPC error envelopes in the body.

// Re-export sub-crates under short module names
pub use jroh_core as core;
pub use jroh_server as server;

// Convenience re-exports of the most commonly used types
pub use jroh_core::{Error, Reply, Response, Result, RpcError};
pub use jroh_server::JrohServer;
