use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use futures::stream;
use tokio_tungstenite::tungstenite::{self, Message};

use super::{on_text, read_frames, redact};
use crate::{Category, Registry};

fn counter(r: &Registry, category: Category) -> Arc<AtomicUsize> {
    let n = Arc::new(AtomicUsize::new(0));
    let c = n.clone();
    r.on(category, move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    n
}

fn frames(
    items: Vec<Result<Message, tungstenite::Error>>,
) -> impl futures::Stream<Item = Result<Message, tungstenite::Error>> + Unpin {
    stream::iter(items)
}

#[tokio::test]
async fn malformed_frame_is_dropped() {
    let r = Registry::new();
    let any = counter(&r, Category::Any);
    let incoming = counter(&r, Category::IncomingMessage);
    let instant = counter(&r, Category::NewInstantMessage);

    read_frames(
        frames(vec![
            Ok(Message::text(r#"{"type":"newInstantMessage","data":{}}"#)),
            Ok(Message::text(r#"{"type":"incomingBuzz"}"#)),
            Ok(Message::text("garbage-not-json")),
        ]),
        &r,
    )
    .await;

    assert_eq!(any.load(Ordering::SeqCst), 2);
    assert_eq!(incoming.load(Ordering::SeqCst), 1);
    assert_eq!(instant.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn frames_after_malformed_still_dispatched() {
    let r = Registry::new();
    let any = counter(&r, Category::Any);
    read_frames(
        frames(vec![
            Ok(Message::text("{")),
            Ok(Message::text(r#"{"no_type":true}"#)),
            Ok(Message::binary(vec![1, 2, 3])),
            Ok(Message::Ping(vec![9].into())),
            Ok(Message::text(r#"{"type":"newEmail"}"#)),
        ]),
        &r,
    )
    .await;
    assert_eq!(any.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn close_frame_stops_reading() {
    let r = Registry::new();
    let any = counter(&r, Category::Any);
    read_frames(
        frames(vec![
            Ok(Message::text(r#"{"type":"a"}"#)),
            Ok(Message::Close(None)),
            Ok(Message::text(r#"{"type":"b"}"#)),
        ]),
        &r,
    )
    .await;
    assert_eq!(any.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn read_error_stops_reading() {
    let r = Registry::new();
    let any = counter(&r, Category::Any);
    read_frames(
        frames(vec![
            Err(tungstenite::Error::ConnectionClosed),
            Ok(Message::text(r#"{"type":"a"}"#)),
        ]),
        &r,
    )
    .await;
    assert_eq!(any.load(Ordering::SeqCst), 0);
}

#[test]
fn on_text_reports_reached_subscribers() {
    let r = Registry::new();
    counter(&r, Category::Any);
    counter(&r, Category::Message);
    assert_eq!(on_text(r#"{"type":"newChannelMessage"}"#, &r).unwrap(), 2);
    assert!(on_text("[]", &r).is_err());
}

#[test]
fn redact_hides_token() {
    assert_eq!(
        redact("ws://127.0.0.1:20001/UtopiaWSS?token=ABCDEF"),
        "ws://127.0.0.1:20001/UtopiaWSS?token=…"
    );
    assert_eq!(redact("ws://h:1/x"), "ws://h:1/x");
}
