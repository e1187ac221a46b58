//! JSON-RPC 2.0 data model for the dispatch pipeline
//!
//! Three shapes flow through the dispatcher:
//!
//! 1. **`Call`**: a validated `(id, method, params)` triple, produced by the
//!    request validator and consumed by the call executor
//! 2. **`Response`**: one envelope per call — `result` XOR `error`, always
//!    echoing the call's id
//! 3. **`Reply`**: what goes back to the transport — a single envelope or an
//!    array of them mirroring a batch
//!
//! # Request ids
//!
//! The id is deliberately an opaque `serde_json::Value`: the dispatcher
//! never interprets it, it only echoes it back verbatim. Clients may send
//! numbers, strings, or anything else JSON permits. A call with no id at
//! all is rejected by the validator (this dispatcher does not support
//! notifications).

use crate::error::ErrorObject;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A validated JSON-RPC call
///
/// Transient and request-scoped: created by the request validator from one
/// candidate call object, consumed by the call executor, discarded once the
/// corresponding [`Response`] exists.
#[derive(Debug, Clone)]
pub struct Call {
    /// Opaque request id, echoed verbatim into the response
    pub id: Value,
    /// Name of the method to resolve against the registry
    pub method: String,
    /// Raw parameters handed to the handler uninterpreted
    pub params: Value,
}

/// JSON-RPC 2.0 response envelope
///
/// Exactly one of `result` / `error` is present, enforced by construction
/// through [`Response::success`] and [`Response::failure`]. The `id` field
/// echoes the request id, or is JSON `null` when no id could be captured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Always "2.0"
    pub jsonrpc: String,
    /// Present only on success, mutually exclusive with `error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Present only on failure, mutually exclusive with `result`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
    /// Echoed request id (JSON null when unknown)
    pub id: Value,
}

impl Response {
    /// Build a success envelope around a handler result.
    pub fn success(result: Value, id: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Build a failure envelope around a wire error object.
    pub fn failure(error: ErrorObject, id: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }

    /// True if this envelope carries a `result`.
    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }

    /// True if this envelope carries an `error`.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Dispatch output handed back to the transport
///
/// A single call yields `Single`; a batch yields `Batch` with one response
/// per input element, in input order. Serializes untagged, so `Single`
/// becomes a JSON object and `Batch` a JSON array (an empty batch encodes
/// as `[]`).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Reply {
    /// One envelope for a single call
    Single(Response),
    /// Ordered envelopes mirroring a batch request
    Batch(Vec<Response>),
}
