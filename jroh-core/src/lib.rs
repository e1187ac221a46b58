//! Core JSON-RPC 2.0 types and codec for jroh
//!
//! This crate provides the foundational, transport-agnostic pieces of the
//! jroh dispatcher:
//!
//! - **Types**: the call/response data model (`Call`, `Response`, `Reply`)
//! - **Errors**: the JSON-RPC error taxonomy and its fixed code/message
//!   mapping (`ErrorKind`, `RpcError`), plus the application-level `Error`
//!   returned by method handlers
//! - **Codec**: text-level decoding of incoming payloads (single call vs
//!   batch) and encoding of outgoing replies
//!
//! # Overview
//!
//! JSON-RPC 2.0 is a stateless RPC convention over JSON: each call carries
//! `method`, `params` and `id`; each response carries `result` XOR `error`,
//! echoing the `id`. This crate owns the wire shapes and the rules for
//! turning any fault into a well-formed error envelope. The `jroh-server`
//! crate builds the HTTP dispatch pipeline on top of it.
//!
//! # Example
//!
//! ```rust
//! use jroh_core::{codec, Payload, Response};
//! use serde_json::json;
//!
//! // Decode an incoming payload
//! let payload = codec::decode(r#"{"id":1,"method":"time","params":{}}"#).unwrap();
//! assert!(matches!(payload, Payload::Single(_)));
//!
//! // Build and encode a success envelope
//! let response = Response::success(json!(1700000000), json!(1));
//! let text = codec::encode(&response).unwrap();
//! assert!(text.contains("\"jsonrpc\":\"2.0\""));
//! ```

pub mod codec;
pub mod error;
pub mod types;

// Re-export the most commonly used items so callers can write
// `jroh_core::Response` instead of `jroh_core::types::Response`.
pub use codec::Payload;
pub use error::{Error, ErrorKind, ErrorObject, Result, RpcError};
pub use types::{Call, Reply, Response};
