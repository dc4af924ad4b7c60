//! Generic REST resource client.
//!
//! Thin primitives over a [`Transport`]: validate arguments, build a
//! [`ResourceRequest`], send it once. Status codes are not interpreted here.

use std::sync::Arc;

use gcal_auth::Credential;
use reqwest::Method;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::RestError;
use crate::transport::{ResourceRequest, ResourceResponse, Transport};

/// Ordered query-string parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn set(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    /// Append a parameter when a value is present.
    pub fn set_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }
}

#[derive(Clone)]
pub struct RestClient {
    transport: Arc<dyn Transport>,
    cancel: Option<CancellationToken>,
}

impl RestClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cancel: None,
        }
    }

    /// Client sharing this transport whose pending calls abort when `token` fires.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            cancel: Some(token),
        }
    }

    /// # Errors
    /// `InvalidArgument` for a bad url or credential; transport failures otherwise.
    pub async fn get(
        &self,
        url: &str,
        query: &QueryParams,
        credential: &Arc<Credential>,
    ) -> Result<ResourceResponse, RestError> {
        check_basic(url, credential)?;
        self.dispatch(Method::GET, url, query.clone(), None, credential)
            .await
    }

    /// # Errors
    /// `InvalidArgument` for a bad url, credential or missing body.
    pub async fn post(
        &self,
        url: &str,
        body: Value,
        credential: &Arc<Credential>,
        query: Option<&QueryParams>,
    ) -> Result<ResourceResponse, RestError> {
        check_basic(url, credential)?;
        check_body(&body)?;
        self.dispatch(Method::POST, url, query.cloned().unwrap_or_default(), Some(body), credential)
            .await
    }

    /// POST carrying all input in the query string (quickAdd, move).
    ///
    /// # Errors
    /// `InvalidArgument` when the query is empty.
    pub async fn post_with_query_string(
        &self,
        url: &str,
        query: &QueryParams,
        credential: &Arc<Credential>,
    ) -> Result<ResourceResponse, RestError> {
        check_basic(url, credential)?;
        if query.is_empty() {
            return Err(RestError::InvalidArgument("query terms needed".into()));
        }
        self.dispatch(Method::POST, url, query.clone(), None, credential)
            .await
    }

    /// # Errors
    /// `InvalidArgument` for a bad url, credential or missing body.
    pub async fn put(
        &self,
        url: &str,
        body: Value,
        credential: &Arc<Credential>,
        query: Option<&QueryParams>,
    ) -> Result<ResourceResponse, RestError> {
        check_basic(url, credential)?;
        check_body(&body)?;
        self.dispatch(Method::PUT, url, query.cloned().unwrap_or_default(), Some(body), credential)
            .await
    }

    /// # Errors
    /// `InvalidArgument` for a bad url, credential or missing body.
    pub async fn patch(
        &self,
        url: &str,
        body: Value,
        credential: &Arc<Credential>,
        query: Option<&QueryParams>,
    ) -> Result<ResourceResponse, RestError> {
        check_basic(url, credential)?;
        check_body(&body)?;
        self.dispatch(Method::PATCH, url, query.cloned().unwrap_or_default(), Some(body), credential)
            .await
    }

    /// # Errors
    /// `InvalidArgument` for a bad url or credential.
    pub async fn delete(
        &self,
        url: &str,
        query: &QueryParams,
        credential: &Arc<Credential>,
    ) -> Result<ResourceResponse, RestError> {
        check_basic(url, credential)?;
        self.dispatch(Method::DELETE, url, query.clone(), None, credential)
            .await
    }

    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        query: QueryParams,
        body: Option<Value>,
        credential: &Arc<Credential>,
    ) -> Result<ResourceResponse, RestError> {
        tracing::debug!(%method, url, "Calendar API request");

        let request = ResourceRequest {
            method,
            url: url.to_string(),
            query,
            body,
            credential: Arc::clone(credential),
        };

        let Some(token) = &self.cancel else {
            return Ok(self.transport.execute(request).await?);
        };

        if token.is_cancelled() {
            return Err(RestError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!(url, "Calendar API request cancelled");
                Err(RestError::Cancelled)
            }
            result = self.transport.execute(request) => Ok(result?),
        }
    }
}

fn check_basic(url: &str, credential: &Credential) -> Result<(), RestError> {
    if url.trim().is_empty() {
        return Err(RestError::InvalidArgument("request url needed".into()));
    }
    match url::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        _ => {
            return Err(RestError::InvalidArgument(format!(
                "absolute http(s) request url needed, got {}",
                url
            )))
        }
    }
    if credential.account_email.trim().is_empty() {
        return Err(RestError::InvalidArgument("jwt credential needed".into()));
    }
    Ok(())
}

fn check_body(body: &Value) -> Result<(), RestError> {
    if body.is_null() {
        return Err(RestError::InvalidArgument("request body needed".into()));
    }
    Ok(())
}
