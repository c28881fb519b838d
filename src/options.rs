use std::time::Duration;

use derive_ex::derive_ex;
use serde::{Deserialize, Serialize};

use super::Token;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_API_PORT: u16 = 20000;
pub const DEFAULT_WS_PORT: u16 = 20001;

/// Connection settings for a [`Client`](crate::Client).
///
/// Every field has a default, so a partial document such as `{"notifications": true}`
/// deserializes into a usable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[derive_ex(Default)]
#[serde(default)]
pub struct ClientOptions {
    #[default(String::from(DEFAULT_HOST))]
    pub host: String,
    #[default(DEFAULT_API_PORT)]
    pub api_port: u16,
    /// Port requested when the server has the notification channel switched off.
    #[default(DEFAULT_WS_PORT)]
    pub ws_port: u16,
    pub notifications: bool,
    /// Per-request timeout. `None` leaves it to the HTTP stack.
    pub timeout_ms: Option<u64>,
}

impl ClientOptions {
    pub fn api_url(&self) -> String {
        format!("http://{}:{}/api/1.0", self.host, self.api_port)
    }
    pub fn ws_url(&self, port: u16, token: &Token) -> String {
        format!("ws://{}:{port}/UtopiaWSS?token={token}", self.host)
    }
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
