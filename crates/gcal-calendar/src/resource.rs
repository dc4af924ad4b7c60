//! Shared request/response contract for every resource wrapper.
//!
//! An [`Operation`] row names the call (`origin`), the HTTP primitive and the
//! accepted status codes. [`ResourceCore`] runs it: call the
//! [`RestClient`], check the status, parse the body, and wrap any failure as a
//! [`NormalizedError`] tagged with the row's origin.

use std::sync::Arc;

use gcal_auth::Credential;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ErrorDetail, NormalizedError, RemoteStatus};
use crate::rest::{QueryParams, RestClient};
use crate::transport::ResourceResponse;

/// Which [`RestClient`] primitive an operation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Get,
    Post,
    PostQuery,
    Put,
    Patch,
    Delete,
}

/// One row of a wrapper's operation table.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub origin: &'static str,
    pub call: Call,
    pub expected: &'static [u16],
}

impl Operation {
    pub const fn new(origin: &'static str, call: Call, expected: &'static [u16]) -> Self {
        Self {
            origin,
            call,
            expected,
        }
    }

    pub const fn get(origin: &'static str) -> Self {
        Self::new(origin, Call::Get, &[200])
    }

    pub const fn post(origin: &'static str) -> Self {
        Self::new(origin, Call::Post, &[200])
    }

    pub const fn post_query(origin: &'static str) -> Self {
        Self::new(origin, Call::PostQuery, &[200])
    }

    pub const fn put(origin: &'static str) -> Self {
        Self::new(origin, Call::Put, &[200])
    }

    pub const fn patch(origin: &'static str) -> Self {
        Self::new(origin, Call::Patch, &[200])
    }

    pub const fn delete(origin: &'static str) -> Self {
        Self::new(origin, Call::Delete, &[204])
    }

    pub(crate) fn fail(&self, error: ErrorDetail) -> NormalizedError {
        NormalizedError::new(self.origin, error)
    }

    /// Reject an empty identifying argument before any network call.
    pub(crate) fn require(&self, value: &str, name: &str) -> Result<(), NormalizedError> {
        if value.trim().is_empty() {
            return Err(NormalizedError::validation(
                self.origin,
                format!("Missing {} argument", name),
            ));
        }
        Ok(())
    }

    /// Serialize a caller-supplied request body.
    pub(crate) fn body<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, NormalizedError> {
        serde_json::to_value(body).map_err(|e| {
            NormalizedError::validation(self.origin, format!("Invalid request body: {}", e))
        })
    }
}

/// Inputs of one call, after path building.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub url: String,
    pub query: QueryParams,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(url: String) -> Self {
        Self {
            url,
            ..Self::default()
        }
    }

    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Response that passed the status check, with its body parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status_code: u16,
    pub status_message: Option<String>,
    pub body: Value,
}

/// Percent-encode one path segment (calendar ids contain `@` and `#`).
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Shared state of a wrapper: client, credential and resource base URL.
#[derive(Clone)]
pub struct ResourceCore {
    rest: Arc<RestClient>,
    credential: Arc<Credential>,
    base_url: String,
}

impl ResourceCore {
    pub fn new(rest: Arc<RestClient>, credential: Arc<Credential>, base_url: String) -> Self {
        Self {
            rest,
            credential,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base_url` followed by `/`-joined, percent-encoded segments.
    pub fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for s in segments {
            url.push('/');
            url.push_str(&segment(s));
        }
        url
    }

    /// Run `op`: call, check status, parse body.
    #[tracing::instrument(skip(self, op, request), fields(origin = op.origin), level = "debug")]
    pub async fn send(&self, op: &Operation, request: Request) -> Result<Reply, NormalizedError> {
        let response = self.call(op, request).await.map_err(|e| op.fail(e.into()))?;
        check_status(op, response)
    }

    /// Whole body as the payload.
    pub async fn body(&self, op: &Operation, request: Request) -> Result<Value, NormalizedError> {
        Ok(self.send(op, request).await?.body)
    }

    /// `body.items` as the payload; a missing `items` yields an empty list.
    pub async fn items(
        &self,
        op: &Operation,
        request: Request,
    ) -> Result<Vec<Value>, NormalizedError> {
        let reply = self.send(op, request).await?;
        extract_items(op, reply.body)
    }

    async fn call(
        &self,
        op: &Operation,
        request: Request,
    ) -> Result<ResourceResponse, crate::error::RestError> {
        let Request { url, query, body } = request;
        let cred = &self.credential;
        let body = body.unwrap_or(Value::Null);

        match op.call {
            Call::Get => self.rest.get(&url, &query, cred).await,
            Call::Post => self.rest.post(&url, body, cred, Some(&query)).await,
            Call::PostQuery => self.rest.post_with_query_string(&url, &query, cred).await,
            Call::Put => self.rest.put(&url, body, cred, Some(&query)).await,
            Call::Patch => self.rest.patch(&url, body, cred, Some(&query)).await,
            Call::Delete => self.rest.delete(&url, &query, cred).await,
        }
    }
}

fn check_status(op: &Operation, response: ResourceResponse) -> Result<Reply, NormalizedError> {
    let ResourceResponse {
        status_code,
        status_message,
        body,
    } = response;

    if !op.expected.contains(&status_code) {
        tracing::warn!(
            origin = op.origin,
            status_code,
            expected = ?op.expected,
            "Unexpected Calendar API status"
        );
        let body = match body {
            Value::String(text) => crate::error::try_parse_json(&text),
            other => other,
        };
        return Err(op.fail(ErrorDetail::RemoteStatus(RemoteStatus {
            status_code,
            status_message,
            body,
        })));
    }

    let body = parse_body(body).map_err(|e| op.fail(ErrorDetail::InvalidBody(e)))?;
    Ok(Reply {
        status_code,
        status_message,
        body,
    })
}

/// Parse a body that arrived as text; structured bodies pass through.
fn parse_body(body: Value) -> Result<Value, String> {
    match body {
        Value::String(text) if text.trim().is_empty() => Ok(Value::Null),
        Value::String(text) => serde_json::from_str(&text).map_err(|e| e.to_string()),
        other => Ok(other),
    }
}

fn extract_items(op: &Operation, body: Value) -> Result<Vec<Value>, NormalizedError> {
    match body {
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => Ok(items),
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(other) => Err(op.fail(ErrorDetail::UnexpectedBody(format!(
                "items is not an array: {}",
                other
            )))),
        },
        Value::Null => Ok(Vec::new()),
        other => Err(op.fail(ErrorDetail::UnexpectedBody(format!(
            "expected an object with items, got {}",
            other
        )))),
    }
}
