use std::{future::Future, pin::Pin};

use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;

use super::{ClientOptions, RequestEnvelope, TransportError};

/// Carries one request envelope to the server and returns the decoded response body.
pub trait Transport {
    fn post(
        &mut self,
        envelope: &RequestEnvelope,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;

    fn boxed(self) -> BoxTransport
    where
        Self: Sized + Send + Sync + 'static,
    {
        BoxTransport(Box::new(self))
    }
}

pub struct BoxTransport(Box<dyn DynTransport + Send + Sync + 'static>);
impl Transport for BoxTransport {
    async fn post(&mut self, envelope: &RequestEnvelope) -> Result<Value, TransportError> {
        self.0.dyn_post(envelope).await
    }
    fn boxed(self) -> BoxTransport
    where
        Self: Sized + Send + Sync + 'static,
    {
        self
    }
}

trait DynTransport {
    fn dyn_post<'a>(
        &'a mut self,
        envelope: &'a RequestEnvelope,
    ) -> Pin<Box<dyn Future<Output = Result<Value, TransportError>> + Send + 'a>>;
}
impl<T: Transport> DynTransport for T {
    fn dyn_post<'a>(
        &'a mut self,
        envelope: &'a RequestEnvelope,
    ) -> Pin<Box<dyn Future<Output = Result<Value, TransportError>> + Send + 'a>> {
        Box::pin(self.post(envelope))
    }
}

/// `POST http://{host}:{api_port}/api/1.0` with a JSON body.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
    url: String,
}
impl HttpTransport {
    pub fn new(options: &ClientOptions) -> Result<Self, TransportError> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = options.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, options.api_url()))
    }
    pub fn with_client(http: HttpClient, url: String) -> Self {
        Self { http, url }
    }
    pub fn url(&self) -> &str {
        &self.url
    }
}
impl Transport for HttpTransport {
    async fn post(&mut self, envelope: &RequestEnvelope) -> Result<Value, TransportError> {
        let body = serde_json::to_vec(envelope).map_err(TransportError::Encode)?;
        let response = self
            .http
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(TransportError::Status(status));
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(TransportError::Decode)
    }
}
