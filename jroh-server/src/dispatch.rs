//! The dispatch pipeline: validation, execution, batch fan-out
//!
//! A [`Dispatcher`] is the explicit context threaded through every request:
//! the registry handle plus the per-call limits. It owns the three dispatch
//! stages for one decoded payload:
//!
//! 1. **Validate** each candidate call object into a `(id, method, params)`
//!    triple, or a structural fault that already knows which id to echo
//! 2. **Execute** the validated call by resolving the method against the
//!    registry and running its handler
//! 3. **Coordinate batches**: arrays fan out per element in input order and
//!    fan back into a reply array of identical length and order; one
//!    element's failure never aborts its siblings
//!
//! Every stage converts faults into envelopes on the spot, so dispatch
//! always produces a well-formed [`Reply`] no matter what came in.
//!
//! # Strictness
//!
//! `id` and `params` are mandatory on every call. JSON-RPC 2.0 would allow
//! omitting both (notifications, default params); this dispatcher keeps the
//! stricter contract and answers with an invalid-request envelope instead.

use jroh_core::{Call, Error, Payload, Reply, Response, RpcError};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::registry::MethodRegistry;

/// Request-dispatch context
///
/// Holds the immutable registry and the dispatch limits. Cheap to clone;
/// shared by every connection task. Stateless between requests.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<MethodRegistry>,
    /// Optional time budget applied to each handler invocation
    call_timeout: Option<Duration>,
    /// Optional cap on batch length (guards against oversized fan-out)
    max_batch_size: Option<usize>,
}

impl Dispatcher {
    /// Create a dispatcher with no call timeout and no batch size cap.
    pub fn new(registry: Arc<MethodRegistry>) -> Self {
        Self {
            registry,
            call_timeout: None,
            max_batch_size: None,
        }
    }

    /// Create a dispatcher with explicit limits.
    pub fn with_limits(
        registry: Arc<MethodRegistry>,
        call_timeout: Option<Duration>,
        max_batch_size: Option<usize>,
    ) -> Self {
        Self {
            registry,
            call_timeout,
            max_batch_size,
        }
    }

    /// Dispatch one decoded payload to completion.
    ///
    /// Single payloads produce a single envelope; batches produce one
    /// envelope per element in input order. An empty batch produces an
    /// empty reply array rather than being reinterpreted as a single call.
    #[tracing::instrument(skip(self, payload), name = "dispatch")]
    pub async fn dispatch(&self, payload: Payload) -> Reply {
        match payload {
            Payload::Single(value) => Reply::Single(self.run_call(&value).await),
            Payload::Batch(elements) => {
                if let Some(max) = self.max_batch_size {
                    if elements.len() > max {
                        tracing::warn!(
                            batch_size = elements.len(),
                            max_size = max,
                            "batch size cap exceeded"
                        );
                        return Reply::Single(
                            RpcError::invalid_request(
                                None,
                                format!(
                                    "batch size limit exceeded: limit={}, actual={}",
                                    max,
                                    elements.len()
                                ),
                            )
                            .into(),
                        );
                    }
                }

                let mut responses = Vec::with_capacity(elements.len());
                for element in &elements {
                    responses.push(self.run_call(element).await);
                }
                tracing::debug!(response_count = responses.len(), "batch dispatched");
                Reply::Batch(responses)
            }
        }
    }

    /// Validate then execute one candidate call object.
    async fn run_call(&self, value: &Value) -> Response {
        match validate(value) {
            Ok(call) => self.execute(call).await,
            Err(fault) => fault.into(),
        }
    }

    /// Resolve the method and run its handler, enforcing the time budget.
    async fn execute(&self, call: Call) -> Response {
        let Call { id, method, params } = call;

        let handler = match self.registry.lookup(&method) {
            Some(handler) => handler,
            None => {
                tracing::debug!(method = %method, "method not found");
                return RpcError::method_not_found(id).into();
            }
        };

        let invocation = handler.handle(params);
        let outcome = match self.call_timeout {
            Some(budget) => match tokio::time::timeout(budget, invocation).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    tracing::warn!(method = %method, budget_ms = budget.as_millis() as u64, "call exceeded time budget");
                    Err(Error::Timeout)
                }
            },
            None => invocation.await,
        };

        match outcome {
            Ok(result) => Response::success(result, id),
            Err(err) => {
                tracing::debug!(method = %method, error = %err, "handler failed");
                RpcError::from_handler(err, id).into()
            }
        }
    }
}

/// Validate one candidate call object.
///
/// The id is captured first because every later fault must echo it. The
/// checks and their detail strings are fixed wire behavior:
///
/// 1. no `id` field → invalid request, `"id missing"`
/// 2. no `method` field, or `method` not a string → invalid request,
///    `"method missing"`
/// 3. no `params` field → invalid request, `"params missing"`
pub fn validate(value: &Value) -> Result<Call, RpcError> {
    let id = match value.get("id") {
        Some(id) => id.clone(),
        None => return Err(RpcError::invalid_request(None, "id missing")),
    };

    let method = match value.get("method").and_then(Value::as_str) {
        Some(method) => method.to_string(),
        None => return Err(RpcError::invalid_request(Some(id), "method missing")),
    };

    let params = match value.get("params") {
        Some(params) => params.clone(),
        None => return Err(RpcError::invalid_request(Some(id), "params missing")),
    };

    Ok(Call { id, method, params })
}
