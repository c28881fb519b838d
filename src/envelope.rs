use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};


/// Parameter map carried by a request.
pub type Params = Map<String, Value>;

/// Method invoked when none is given. Cheap and side-effect free.
pub const DEFAULT_METHOD: &str = "getSystemInfo";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub token: String,
    pub method: String,
    pub params: Params,
}
impl RequestEnvelope {
    pub fn new(token: &str, method: Option<&str>, params: Option<Params>) -> Self {
        Self {
            token: token.to_string(),
            method: method.unwrap_or(DEFAULT_METHOD).to_string(),
            params: params.unwrap_or_default(),
        }
    }
}

/// Event pushed by the server over the notification channel.
///
/// Only `type` is interpreted. All other fields are kept verbatim in `payload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}
impl NotificationEvent {
    pub fn from_frame(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}
