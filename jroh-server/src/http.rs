//! HTTP boundary for the dispatcher
//!
//! One function per inbound request: take the raw body and connection
//! metadata, run the dispatch pipeline, hand back bytes. The transport
//! rules are fixed:
//!
//! - the JSON-RPC endpoint answers **HTTP 200 in every case** — protocol
//!   faults (bad method, empty body, parse errors, failed calls) are
//!   reported inside the JSON payload, never via HTTP status codes
//! - paths other than the configured endpoint get a plain 404
//! - replies are `application/json`
//!
//! Request and reply bodies are logged at `debug` level together with the
//! peer address.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, Response as HttpResponse, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;

use jroh_core::{codec, Reply, RpcError};

use crate::dispatch::Dispatcher;

/// Serve one HTTP request.
///
/// Never fails: every fault inside the endpoint becomes a JSON error
/// envelope in a 200 reply.
pub(crate) async fn handle_request(
    req: Request<Incoming>,
    dispatcher: Dispatcher,
    endpoint: &str,
    peer: SocketAddr,
) -> Result<HttpResponse<Full<Bytes>>, Infallible> {
    if req.uri().path() != endpoint {
        return Ok(not_found());
    }

    let reply = endpoint_reply(req, &dispatcher, peer).await;
    Ok(json_reply(&reply, peer))
}

/// Run the endpoint state machine and produce the reply value.
///
/// Received → Checked → Parsed → dispatched; any failure short-circuits to
/// an error envelope.
async fn endpoint_reply(req: Request<Incoming>, dispatcher: &Dispatcher, peer: SocketAddr) -> Reply {
    // Non-POST traffic is a structural fault, still answered with 200.
    if req.method() != Method::POST {
        tracing::debug!(peer = %peer, http_method = %req.method(), "rejecting non-POST request");
        return Reply::Single(RpcError::invalid_request(None, "POST required").into());
    }

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            tracing::debug!(peer = %peer, error = %e, "failed to read request body");
            return Reply::Single(RpcError::invalid_request(None, "Empty Request").into());
        }
    };

    if body.is_empty() {
        // Detail text "Empty Request" is fixed wire behavior.
        return Reply::Single(RpcError::invalid_request(None, "Empty Request").into());
    }

    let text = match std::str::from_utf8(&body) {
        Ok(text) => text,
        Err(e) => return Reply::Single(RpcError::parse(e.to_string()).into()),
    };

    tracing::debug!(peer = %peer, request = %text, "request");

    let payload = match codec::decode(text) {
        Ok(payload) => payload,
        Err(fault) => return Reply::Single(fault.into()),
    };

    dispatcher.dispatch(payload).await
}

/// Serialize the reply and wrap it in a 200 response.
fn json_reply(reply: &Reply, peer: SocketAddr) -> HttpResponse<Full<Bytes>> {
    // Serialization of values the dispatcher built cannot fail; if it ever
    // does, answer with an empty body rather than tearing the request down.
    let text = match codec::encode(reply) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "reply serialization failed");
            String::new()
        }
    };

    tracing::debug!(peer = %peer, response = %text, "response");

    HttpResponse::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(text)))
        .unwrap_or_else(|_| HttpResponse::new(Full::new(Bytes::new())))
}

fn not_found() -> HttpResponse<Full<Bytes>> {
    HttpResponse::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Full::new(Bytes::from("Not Found")))
        .unwrap_or_else(|_| HttpResponse::new(Full::new(Bytes::new())))
}
