use std::sync::Arc;

use serde_json::Value;
use tokio_tungstenite::tungstenite;

use super::{ClientOptions, Dispatcher, NotificationChannel, Params, Registry, TransportError};


pub(crate) const GET_STATE_METHOD: &str = "getWebSocketState";
pub(crate) const SET_STATE_METHOD: &str = "setWebSocketState";

/// Why the notification channel could not be brought up.
///
/// Never returned to callers; the client logs it and runs without notifications.
#[derive(Debug, thiserror::Error)]
pub(crate) enum SetupError {
    #[error("enabling the notification channel failed: {0}")]
    Enable(#[source] TransportError),
    #[error("server refused to enable the notification channel: {0}")]
    Refused(String),
    #[error("connecting to {url} failed: {source}")]
    Connect {
        url: String,
        #[source]
        source: tungstenite::Error,
    },
}

/// Finds the port the server pushes notifications on, switching the channel on if needed.
pub(crate) async fn negotiate(dispatcher: &Dispatcher, fallback_port: u16) -> Result<u16, SetupError> {
    match dispatcher.send(Some(GET_STATE_METHOD), None).await {
        Ok(response) => match reported_port(&response) {
            Some(port) if port != 0 => {
                tracing::debug!(port, "notification channel already active");
                return Ok(port);
            }
            _ => tracing::debug!("notification channel disabled on server"),
        },
        Err(e) => tracing::warn!(error = %e, "querying notification channel state failed"),
    }

    let mut params = Params::new();
    params.insert("enabled".into(), "true".into());
    params.insert("port".into(), fallback_port.to_string().into());
    let response = dispatcher
        .send(Some(SET_STATE_METHOD), Some(params))
        .await
        .map_err(SetupError::Enable)?;
    if let Some(error) = reported_error(&response) {
        return Err(SetupError::Refused(error));
    }
    Ok(fallback_port)
}

pub(crate) async fn activate(
    dispatcher: &Dispatcher,
    options: &ClientOptions,
    registry: Arc<Registry>,
) -> Result<NotificationChannel, SetupError> {
    let port = negotiate(dispatcher, options.ws_port).await?;
    let url = options.ws_url(port, dispatcher.token());
    NotificationChannel::open(&url, registry).await
}

fn reported_port(response: &Value) -> Option<u16> {
    match response.get("result")? {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn reported_error(response: &Value) -> Option<String> {
    match response.get("error")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
