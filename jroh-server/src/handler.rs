//! Handler traits and helpers for JSON-RPC methods
//!
//! The [`Handler`] trait is the interface every registered method
//! implements. Handlers receive the call's raw `params` value (params are
//! mandatory in this dispatcher, so there is no `Option` here) and resolve
//! to either a result value or an application [`Error`] that the executor
//! maps into the error taxonomy.
//!
//! Handlers must be `Send + Sync`: the registry shares them across
//! connection tasks, and they are expected to be stateless or to use
//! interior mutability. They must not retain references to `params` beyond
//! the call.
//!
//! # Creating handlers
//!
//! - [`from_fn`] wraps an async closure working on raw `serde_json::Value`
//! - [`from_typed_fn`] adds automatic param deserialization and result
//!   serialization
//!
//! ```rust
//! use jroh_server::{from_fn, from_typed_fn};
//! use serde::Deserialize;
//!
//! let echo = from_fn(|params| async move { Ok(params) });
//!
//! #[derive(Deserialize)]
//! struct AddParams { a: i64, b: i64 }
//!
//! let add = from_typed_fn(|p: AddParams| async move { Ok(p.a + p.b) });
//! ```

use jroh_core::{Error, Result};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// Future returned by a handler invocation
///
/// Boxed and pinned so handlers with different concrete future types can
/// share one registry slot type.
pub type HandlerResult = Pin<Box<dyn Future<Output = Result<Value>> + Send>>;

/// Interface implemented by every registered method
pub trait Handler: Send + Sync {
    /// Run the method against the call's parameters.
    ///
    /// Errors returned here are mapped into JSON-RPC error envelopes by the
    /// call executor; they never abort the surrounding request or batch.
    fn handle(&self, params: Value) -> HandlerResult;
}

/// Adapter that turns an async function into a [`Handler`]
pub struct AsyncHandler<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    func: F,
}

impl<F, Fut> Handler for AsyncHandler<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    fn handle(&self, params: Value) -> HandlerResult {
        Box::pin((self.func)(params))
    }
}

/// Create a handler from an async function over raw JSON values.
pub fn from_fn<F, Fut>(func: F) -> Box<dyn Handler>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Box::new(AsyncHandler { func })
}

/// Create a handler with automatic parameter and result conversion.
///
/// Parameters that fail to deserialize into `P` become an invalid-params
/// error (-32602); results that fail to serialize become a serialization
/// error mapped to the unclassified code.
pub fn from_typed_fn<P, R, F, Fut>(func: F) -> Box<dyn Handler>
where
    P: serde::de::DeserializeOwned + Send + 'static,
    R: serde::Serialize + Send + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R>> + Send + 'static,
{
    use std::sync::Arc;
    // Closures are not Clone; Arc lets each invocation move a handle into
    // its async block.
    let func = Arc::new(func);

    from_fn(move |params: Value| {
        let func = Arc::clone(&func);
        async move {
            let params: P = serde_json::from_value(params)
                .map_err(|e| Error::InvalidParams(e.to_string()))?;

            let result = func(params).await?;

            serde_json::to_value(result).map_err(|e| Error::Serialization(e.to_string()))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Deserialize)]
    struct AddParams {
        a: i64,
        b: i64,
    }

    #[derive(Serialize, Deserialize)]
    struct AddResult {
        sum: i64,
    }

    #[tokio::test]
    async fn test_raw_handler() {
        let handler = from_fn(|params| async move { Ok(json!({"echo": params})) });
        let result = handler.handle(json!([1, 2])).await.unwrap();
        assert_eq!(result, json!({"echo": [1, 2]}));
    }

    #[tokio::test]
    async fn test_typed_handler() {
        let handler = from_typed_fn(|p: AddParams| async move { Ok(AddResult { sum: p.a + p.b }) });
        let result = handler.handle(json!({"a": 5, "b": 3})).await.unwrap();
        let parsed: AddResult = serde_json::from_value(result).unwrap();
        assert_eq!(parsed.sum, 8);
    }

    #[tokio::test]
    async fn test_typed_handler_bad_params() {
        let handler = from_typed_fn(|p: AddParams| async move { Ok(p.a + p.b) });
        let err = handler.handle(json!({"a": "one"})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParams(_)));
    }
}
