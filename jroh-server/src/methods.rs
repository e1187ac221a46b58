//! Built-in method handlers

use crate::handler::{from_fn, Handler};
use jroh_core::Error;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// `time`: current Unix epoch as an integer. Params are ignored.
///
/// ```rust
/// use jroh_server::{methods, JrohServer};
///
/// # async fn example() -> jroh_core::Result<()> {
/// let server = JrohServer::builder()
///     .bind_str("127.0.0.1:0")?
///     .handler("time", methods::time())
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub fn time() -> Box<dyn Handler> {
    from_fn(|_params| async {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| Error::Internal(e.to_string()))?;
        Ok(Value::from(now.as_secs()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_time_returns_current_epoch() {
        let handler = time();
        let result = handler.handle(json!({})).await.unwrap();
        let reported = result.as_u64().expect("epoch should be an integer");

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        // Within a few seconds of the system clock at call time.
        assert!(now.abs_diff(reported) < 5);
    }

    #[tokio::test]
    async fn test_time_ignores_params() {
        let handler = time();
        assert!(handler.handle(json!(null)).await.is_ok());
        assert!(handler.handle(json!([1, 2, 3])).await.is_ok());
    }
}
