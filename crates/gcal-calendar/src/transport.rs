//! Authenticated transport: signs and sends one HTTP request.

use std::sync::Arc;

use async_trait::async_trait;
use gcal_auth::{Credential, ServiceAccountTokenSource, TokenSource};
use reqwest::Method;
use serde_json::Value;

use crate::error::TransportError;
use crate::rest::QueryParams;

/// One outgoing API call.
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    pub method: Method,
    pub url: String,
    pub query: QueryParams,
    pub body: Option<Value>,
    pub credential: Arc<Credential>,
}

/// Raw response handed back to the wrappers.
///
/// `body` is either already structured or a `Value::String` holding the
/// response text; an empty body is `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceResponse {
    pub status_code: u16,
    pub status_message: Option<String>,
    pub body: Value,
}

impl ResourceResponse {
    pub fn new(status_code: u16, body: Value) -> Self {
        Self {
            status_code,
            status_message: None,
            body,
        }
    }

    pub fn with_message(mut self, status_message: impl Into<String>) -> Self {
        self.status_message = Some(status_message.into());
        self
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` once. Non-2xx statuses are not errors at this layer.
    ///
    /// # Errors
    /// Returns a [`TransportError`] when signing or sending fails.
    async fn execute(&self, request: ResourceRequest) -> Result<ResourceResponse, TransportError>;
}

/// reqwest-backed transport authenticating with bearer tokens.
pub struct HttpTransport {
    client: reqwest::Client,
    tokens: Arc<dyn TokenSource>,
}

impl HttpTransport {
    pub fn new(tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            client: reqwest::Client::new(),
            tokens,
        }
    }

    /// Transport using the service-account JWT flow against Google.
    pub fn service_account() -> Self {
        Self::new(Arc::new(ServiceAccountTokenSource::new()))
    }

    pub fn with_client(client: reqwest::Client, tokens: Arc<dyn TokenSource>) -> Self {
        Self { client, tokens }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ResourceRequest) -> Result<ResourceResponse, TransportError> {
        let token = self.tokens.token(&request.credential).await?;

        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .bearer_auth(&token.token);

        if !request.query.is_empty() {
            builder = builder.query(request.query.pairs());
        }
        match &request.body {
            Some(body) => builder = builder.json(body),
            // Body-less POST/PUT/PATCH still needs `Content-Length: 0`.
            None if request.method != Method::GET && request.method != Method::DELETE => {
                builder = builder
                    .header(reqwest::header::CONTENT_LENGTH, "0")
                    .body(Vec::<u8>::new());
            }
            None => {}
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(ResourceResponse {
            status_code: status.as_u16(),
            status_message: status.canonical_reason().map(str::to_string),
            body: if text.is_empty() {
                Value::Null
            } else {
                Value::String(text)
            },
        })
    }
}
