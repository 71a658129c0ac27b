//! # HTTP Transport
//!
//! The boundary between the generic client and the network. A transport
//! takes a verb, a path relative to its base address and an optional JSON
//! body, and returns the status with the body text. The base address is fixed
//! when the transport is built.

use crate::framework::TransportError;
use crate::runtime::ClientSettings;
use async_trait::async_trait;
use http::{Method, StatusCode};
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    /// Relative to the transport's base address, no leading slash.
    pub path: String,
    pub body: Option<Value>,
}

impl TransportRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: StatusCode,
    /// `None` when the response carried no content.
    pub body: Option<String>,
}

impl TransportResponse {
    pub fn new(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = (!body.trim().is_empty()).then_some(body);
        self
    }
}

/// Anything that can carry a request to the remote service.
///
/// Implementations must tolerate concurrent in-flight requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Production transport over a shared, pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_address: Url,
}

impl ReqwestTransport {
    /// Builds a transport from settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: &ClientSettings) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(map_transport_error)?;
        Ok(Self::with_client(client, settings.base_address.clone()))
    }

    pub fn with_client(client: Client, base_address: Url) -> Self {
        Self {
            client,
            base_address,
        }
    }

    pub fn base_address(&self) -> &Url {
        &self.base_address
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = self
            .base_address
            .join(&request.path)
            .map_err(|e| TransportError::Request(e.to_string()))?;
        debug!(method = %request.method, %url, "Sending request");

        let mut builder = self
            .client
            .request(request.method, url)
            .header(ACCEPT, "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        Ok(TransportResponse::new(status).with_body(body))
    }
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Request(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_body_is_no_content() {
        let response = TransportResponse::new(StatusCode::OK).with_body("  ");
        assert_eq!(response.body, None);
        let response = TransportResponse::new(StatusCode::OK).with_body("5");
        assert_eq!(response.body.as_deref(), Some("5"));
    }

    #[test]
    fn test_base_address_join_keeps_prefix() {
        let settings = ClientSettings::default();
        let transport = ReqwestTransport::new(&settings).unwrap();
        let url = transport.base_address().join("Workspace/Count").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/Workspace/Count");
    }
}
