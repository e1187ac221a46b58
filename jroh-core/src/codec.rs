//! Codec for request payloads and reply envelopes
//!
//! The transport hands the dispatcher raw UTF-8 text; this module turns it
//! into a [`Payload`] (single call vs batch) and turns the dispatcher's
//! reply back into text. Individual batch elements stay raw
//! `serde_json::Value`s here — structural validation happens per element in
//! the dispatcher, so one malformed element cannot poison its siblings.
//!
//! # Error mapping
//!
//! Malformed JSON text maps to a parse fault (-32700) carrying the parser's
//! own message as detail. Encoding never fails for the well-formed values
//! the dispatcher builds; the `Result` on [`encode`] exists for the
//! seam, not for expected traffic.

use crate::error::{Error, Result, RpcError};
use serde::Serialize;
use serde_json::Value;

/// Top-level shape of one incoming request body
#[derive(Debug, Clone)]
pub enum Payload {
    /// The whole body is one candidate call object
    Single(Value),
    /// The body is a JSON array of candidate call objects, kept raw for
    /// per-element validation (may be empty)
    Batch(Vec<Value>),
}

/// Decode a request body into a single call or a batch.
///
/// Any JSON value that is not an array is treated as a single candidate
/// call; the validator decides whether it is actually well-formed. Arrays
/// become batches, including empty ones (an empty batch yields an empty
/// reply array downstream).
///
/// # Errors
///
/// Returns a parse [`RpcError`] (-32700) when the text is not valid JSON,
/// with the parser's message as detail.
pub fn decode(text: &str) -> std::result::Result<Payload, RpcError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| RpcError::parse(e.to_string()))?;

    match value {
        Value::Array(elements) => Ok(Payload::Batch(elements)),
        other => Ok(Payload::Single(other)),
    }
}

/// Encode any serializable message to JSON text.
///
/// Used for replies on their way back to the transport.
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| Error::Serialization(e.to_string()))
}
