//! Error taxonomy for jroh
//!
//! Two layers of error handling live here:
//!
//! - **`Error`**: application-level errors returned by method handlers and
//!   by server plumbing (uses thiserror)
//! - **`RpcError`**: a tagged protocol fault, created at the point a fault
//!   is detected and carrying exactly enough data to build the error
//!   envelope on demand
//!
//! # Fixed code/message mapping
//!
//! Every `ErrorKind` maps to one wire code and one fixed message string:
//!
//! | kind | code | message |
//! |---|---|---|
//! | Parse | -32700 | "Parse error." |
//! | InvalidRequest | -32600 | "Invalid request." |
//! | MethodNotFound | -32601 | "Method not found." |
//! | InvalidParams | -32602 | "Invalid params." |
//! | Internal | -32603 | "Internal error." |
//! | Server | -32000 | "Server error." |
//! | Undefined | -32001 | "Error object not defined." |
//!
//! The free-form detail (e.g. `"id missing"`) travels in the error object's
//! `data` field, never in `message`.
//!
//! # Propagation policy
//!
//! Every fault is converted into an `RpcError` where it is detected and
//! always ends up as a well-formed envelope. Nothing is retried internally
//! and no fault is fatal to the process.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error as ThisError;

use crate::types::Response;

/// Result type for jroh operations
///
/// Used by method handlers and throughout the jroh crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Application-level error type for jroh operations
///
/// Method handlers return this to signal failure; the call executor maps it
/// into an [`RpcError`] carrying the request id. Variants that correspond
/// directly to a JSON-RPC error kind map onto that kind; everything else
/// falls through to the unclassified `-32001` code.
#[derive(Debug, Clone, ThisError)]
pub enum Error {
    /// The method exists but its parameters are wrong (wrong type, missing
    /// required fields). Maps to JSON-RPC code -32602.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// Unexpected failure inside a handler. Maps to JSON-RPC code -32603.
    #[error("internal error: {0}")]
    Internal(String),

    /// Implementation-defined server fault. Maps to JSON-RPC code -32000.
    #[error("server error: {0}")]
    Server(String),

    /// Conversion between Rust values and JSON failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Low-level I/O failure (bind, accept, socket errors).
    #[error("io error: {0}")]
    Io(String),

    /// A handler exceeded its per-call time budget. Reported to the client
    /// as a server error (-32000).
    #[error("call exceeded time budget")]
    Timeout,
}

impl Error {
    /// The JSON-RPC error kind this error reports as on the wire.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidParams(_) => ErrorKind::InvalidParams,
            Error::Internal(_) => ErrorKind::Internal,
            Error::Server(_) | Error::Timeout => ErrorKind::Server,
            Error::Serialization(_) | Error::Io(_) => ErrorKind::Undefined,
        }
    }
}

/// The JSON-RPC 2.0 error taxonomy
///
/// Each kind owns its wire code and fixed message text. `Undefined` is the
/// fallback for faults that fit no reserved category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed JSON text in the request body
    Parse,
    /// Structurally invalid call (missing id/method/params, empty body,
    /// wrong HTTP method)
    InvalidRequest,
    /// No handler registered under the requested method name
    MethodNotFound,
    /// Reserved for handler use: parameters did not validate
    InvalidParams,
    /// Handler-reported unexpected failure
    Internal,
    /// Implementation-defined server fault (also used for call timeouts)
    Server,
    /// Fallback for unclassified faults
    Undefined,
}

impl ErrorKind {
    /// Wire error code for this kind.
    pub fn code(self) -> i64 {
        match self {
            ErrorKind::Parse => -32700,
            ErrorKind::InvalidRequest => -32600,
            ErrorKind::MethodNotFound => -32601,
            ErrorKind::InvalidParams => -32602,
            ErrorKind::Internal => -32603,
            ErrorKind::Server => -32000,
            ErrorKind::Undefined => -32001,
        }
    }

    /// Fixed wire message for this kind. The trailing period is part of the
    /// wire format.
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::Parse => "Parse error.",
            ErrorKind::InvalidRequest => "Invalid request.",
            ErrorKind::MethodNotFound => "Method not found.",
            ErrorKind::InvalidParams => "Invalid params.",
            ErrorKind::Internal => "Internal error.",
            ErrorKind::Server => "Server error.",
            ErrorKind::Undefined => "Error object not defined.",
        }
    }
}

/// A protocol fault, tagged with its kind and the id it must echo
///
/// Created wherever a fault is detected; immutable; consumed into a
/// [`Response`] by the envelope assembler. `id` is `None` when the fault
/// occurred before an id could be captured (parse errors, empty bodies,
/// missing id) — the envelope then carries `"id": null`.
#[derive(Debug, Clone)]
pub struct RpcError {
    /// Which taxonomy entry this fault belongs to
    pub kind: ErrorKind,
    /// The request id to echo, if one was captured before the fault
    pub id: Option<Value>,
    /// Free-form detail, serialized into the error object's `data` field
    pub detail: String,
}

impl RpcError {
    /// Create a fault with an explicit kind, id and detail.
    pub fn new(kind: ErrorKind, id: Option<Value>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            id,
            detail: detail.into(),
        }
    }

    /// Create a parse fault (-32700). Parse faults never have an id.
    pub fn parse(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, None, detail)
    }

    /// Create an invalid-request fault (-32600).
    pub fn invalid_request(id: Option<Value>, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, id, detail)
    }

    /// Create a method-not-found fault (-32601) echoing the call's id.
    pub fn method_not_found(id: Value) -> Self {
        Self::new(ErrorKind::MethodNotFound, Some(id), "")
    }

    /// Wrap a handler failure, keeping the handler's message as detail.
    pub fn from_handler(err: Error, id: Value) -> Self {
        let kind = err.kind();
        let detail = match err {
            Error::InvalidParams(msg)
            | Error::Internal(msg)
            | Error::Server(msg)
            | Error::Serialization(msg)
            | Error::Io(msg) => msg,
            Error::Timeout => err.to_string(),
        };
        Self::new(kind, Some(id), detail)
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.code(), self.kind.message(), self.detail)
    }
}

impl std::error::Error for RpcError {}

/// Wire-format error object
///
/// This is the `error` member of a failure envelope:
/// `{"code": <int>, "message": <fixed text>, "data": <detail>}`.
/// `data` is always present and always a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Numeric error code from the fixed mapping
    pub code: i64,
    /// Fixed message text for the error kind
    pub message: String,
    /// Free-form detail captured at the fault site
    pub data: String,
}

impl From<&RpcError> for ErrorObject {
    fn from(err: &RpcError) -> Self {
        ErrorObject {
            code: err.kind.code(),
            message: err.kind.message().to_string(),
            data: err.detail.clone(),
        }
    }
}

impl From<RpcError> for Response {
    /// Assemble the failure envelope: `{"jsonrpc":"2.0","id":<echoed or
    /// null>,"error":{...}}`.
    fn from(err: RpcError) -> Self {
        let object = ErrorObject::from(&err);
        let id = err.id.unwrap_or(Value::Null);
        Response::failure(object, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_code_mapping_is_exact() {
        let expected = [
            (ErrorKind::Parse, -32700, "Parse error."),
            (ErrorKind::InvalidRequest, -32600, "Invalid request."),
            (ErrorKind::MethodNotFound, -32601, "Method not found."),
            (ErrorKind::InvalidParams, -32602, "Invalid params."),
            (ErrorKind::Internal, -32603, "Internal error."),
            (ErrorKind::Server, -32000, "Server error."),
            (ErrorKind::Undefined, -32001, "Error object not defined."),
        ];
        for (kind, code, message) in expected {
            assert_eq!(kind.code(), code);
            assert_eq!(kind.message(), message);
        }
    }

    #[test]
    fn test_handler_error_kinds() {
        assert_eq!(
            Error::InvalidParams("x".into()).kind(),
            ErrorKind::InvalidParams
        );
        assert_eq!(Error::Internal("x".into()).kind(), ErrorKind::Internal);
        assert_eq!(Error::Server("x".into()).kind(), ErrorKind::Server);
        assert_eq!(Error::Timeout.kind(), ErrorKind::Server);
        assert_eq!(
            Error::Serialization("x".into()).kind(),
            ErrorKind::Undefined
        );
    }

    #[test]
    fn test_missing_id_serializes_as_null() {
        let response: Response = RpcError::invalid_request(None, "id missing").into();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["id"], Value::Null);
        assert_eq!(value["error"]["code"], json!(-32600));
        assert_eq!(value["error"]["message"], json!("Invalid request."));
        assert_eq!(value["error"]["data"], json!("id missing"));
    }

    #[test]
    fn test_captured_id_is_echoed() {
        let response: Response =
            RpcError::invalid_request(Some(json!(7)), "method missing").into();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["id"], json!(7));
    }

    #[test]
    fn test_method_not_found_has_empty_data() {
        let response: Response = RpcError::method_not_found(json!("abc")).into();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["error"]["code"], json!(-32601));
        assert_eq!(value["error"]["data"], json!(""));
        assert_eq!(value["id"], json!("abc"));
    }

    #[test]
    fn test_from_handler_keeps_message() {
        let err = RpcError::from_handler(Error::Internal("db down".into()), json!(1));
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.detail, "db down");
    }

    #[test]
    fn test_timeout_maps_to_server_error() {
        let err = RpcError::from_handler(Error::Timeout, json!(2));
        assert_eq!(err.kind.code(), -32000);
        assert!(err.detail.contains("time budget"));
    }
}
