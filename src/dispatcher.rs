use serde_json::Value;
use tokio::sync::Mutex;

use super::{BoxTransport, Params, RequestEnvelope, Token, Transport, TransportError};

/// Sends request envelopes one at a time.
///
/// The transport sits behind an async mutex that is held for the whole round-trip,
/// so requests issued through one dispatcher reach the server in the order
/// their callers acquired the lock. Nothing is ever retried.
pub struct Dispatcher {
    token: Token,
    transport: Mutex<BoxTransport>,
}

impl Dispatcher {
    pub fn new(token: Token, transport: impl Transport + Send + Sync + 'static) -> Self {
        Self {
            token,
            transport: Mutex::new(transport.boxed()),
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub async fn send(
        &self,
        method: Option<&str>,
        params: Option<Params>,
    ) -> Result<Value, TransportError> {
        let envelope = RequestEnvelope::new(self.token.as_str(), method, params);
        let mut transport = self.transport.lock().await;
        tracing::debug!(method = %envelope.method, "dispatching request");
        let result = transport.post(&envelope).await;
        if let Err(e) = &result {
            tracing::debug!(method = %envelope.method, error = %e, "request failed");
        }
        result
    }
}
