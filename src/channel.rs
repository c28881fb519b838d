use std::sync::Arc;

use futures::{SinkExt, Stream, StreamExt, stream::SplitSink};
use parse_display::Display;
use tokio::{net::TcpStream, spawn, sync::watch, task::JoinHandle};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, Message},
};

use super::{NotificationEvent, Registry, activation::SetupError};

#[cfg(test)]
mod tests;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Lifecycle of the notification socket. `Closed` is terminal; there is no reconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display(style = "lowercase")]
pub enum ChannelState {
    Unopened,
    Connecting,
    Open,
    Closed,
}

#[derive(Debug, thiserror::Error)]
#[error("malformed notification frame: {0}")]
pub(crate) struct MalformedFrame(#[source] serde_json::Error);

/// Open WebSocket feeding a [`Registry`].
///
/// Frames are read on a spawned task, so delivery never waits on the request path.
pub struct NotificationChannel {
    state: Arc<watch::Sender<ChannelState>>,
    sink: Option<SplitSink<WsStream, Message>>,
    task: Option<JoinHandle<()>>,
    registry: Arc<Registry>,
}

impl NotificationChannel {
    pub(crate) async fn open(url: &str, registry: Arc<Registry>) -> Result<Self, SetupError> {
        let state = Arc::new(watch::channel(ChannelState::Connecting).0);
        let (ws, _response) = connect_async(url).await.map_err(|source| {
            state.send_replace(ChannelState::Closed);
            SetupError::Connect {
                url: redact(url),
                source,
            }
        })?;
        let (sink, stream) = ws.split();
        state.send_replace(ChannelState::Open);
        tracing::info!(url = %redact(url), "notification channel open");

        let task = spawn({
            let state = state.clone();
            let registry = registry.clone();
            async move {
                read_frames(stream, &registry).await;
                registry.close();
                state.send_replace(ChannelState::Closed);
                tracing::info!("notification channel closed");
            }
        });
        Ok(Self {
            state,
            sink: Some(sink),
            task: Some(task),
            registry,
        })
    }

    pub fn state(&self) -> ChannelState {
        *self.state.borrow()
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Resolves once the channel reaches [`ChannelState::Closed`].
    pub async fn closed(&self) {
        let mut rx = self.state.subscribe();
        let _ = rx.wait_for(|s| *s == ChannelState::Closed).await;
    }

    /// Sends a close frame, stops the reader and closes the registry.
    pub async fn close(&mut self) {
        if let Some(mut sink) = self.sink.take() {
            if let Err(e) = sink.close().await {
                tracing::debug!(error = %e, "close frame not delivered");
            }
        }
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
        self.finish();
    }

    fn finish(&self) {
        self.registry.close();
        self.state.send_replace(ChannelState::Closed);
    }
}

impl Drop for NotificationChannel {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.finish();
    }
}

/// Dispatches text frames until the stream ends, a close frame arrives or a read fails.
pub(crate) async fn read_frames<S>(mut frames: S, registry: &Registry)
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(frame) = frames.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                if let Err(e) = on_text(text.as_str(), registry) {
                    tracing::warn!(error = %e, "dropping notification frame");
                }
            }
            Ok(Message::Close(frame)) => {
                tracing::debug!(?frame, "close frame received");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "notification channel read failed");
                break;
            }
        }
    }
}

fn on_text(text: &str, registry: &Registry) -> Result<usize, MalformedFrame> {
    let event = NotificationEvent::from_frame(text).map_err(MalformedFrame)?;
    tracing::trace!(ty = %event.ty, "notification");
    Ok(registry.dispatch(&event))
}

fn redact(url: &str) -> String {
    match url.split_once("token=") {
        Some((head, _)) => format!("{head}token=…"),
        None => url.to_string(),
    }
}
