#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use serde_json::Value;
use utopia_api::{RequestEnvelope, Transport, TransportError};

pub const TOKEN: &str = "0123456789abcdef";

pub type Log = Arc<Mutex<Vec<RequestEnvelope>>>;

pub fn methods(log: &Log) -> Vec<String> {
    log.lock().unwrap().iter().map(|e| e.method.clone()).collect()
}

/// Answers every request with the envelope it received.
#[derive(Default)]
pub struct Echo {
    pub log: Log,
}
impl Transport for Echo {
    async fn post(&mut self, envelope: &RequestEnvelope) -> Result<Value, TransportError> {
        self.log.lock().unwrap().push(envelope.clone());
        serde_json::to_value(envelope).map_err(TransportError::Encode)
    }
}

/// Answers with queued replies, in order, and fails once they run out.
pub struct Scripted {
    pub log: Log,
    pub replies: VecDeque<Result<Value, TransportError>>,
}
impl Scripted {
    pub fn new(replies: Vec<Result<Value, TransportError>>) -> (Self, Log) {
        let log = Log::default();
        (
            Self {
                log: log.clone(),
                replies: replies.into(),
            },
            log,
        )
    }
}
impl Transport for Scripted {
    async fn post(&mut self, envelope: &RequestEnvelope) -> Result<Value, TransportError> {
        self.log.lock().unwrap().push(envelope.clone());
        self.replies.pop_front().unwrap_or(Err(TransportError::Status(
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
        )))
    }
}
