//! Fetch interface used by controllers, plus the reqwest-backed implementation.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use shared::error::ApiErrorBody;
use tracing::{debug, warn};
use url::Url;

use crate::{error::ConsoleError, session::AccessToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// One request relative to the API base, e.g. `GET messages?page=2`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, ConsoleError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn execute(&self, token: &AccessToken, request: ApiRequest)
        -> Result<Value, ConsoleError>;
}

pub struct HttpAdminApi {
    http: Client,
    base_url: String,
}

impl HttpAdminApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConsoleError> {
        let parsed = Url::parse(base_url.trim()).map_err(|err| {
            ConsoleError::validation(format!("invalid API base url '{base_url}': {err}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConsoleError::validation(
                "API base url must start with http:// or https://",
            ));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ConsoleError::Transport(err.to_string()))?;
        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn execute(
        &self,
        token: &AccessToken,
        request: ApiRequest,
    ) -> Result<Value, ConsoleError> {
        let url = self.url_for(&request.path);
        let builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        };
        let mut builder = builder.bearer_auth(token.as_str());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(method = %request.method, path = %request.path, "http: sending request");
        let response = builder.send().await.map_err(|err| {
            warn!(method = %request.method, path = %request.path, "http: transport failure: {err}");
            ConsoleError::Transport(err.to_string())
        })?;
        let status = response.status();
        let bytes = response.bytes().await?;
        interpret_response(status, &bytes)
    }
}

/// Maps a raw HTTP result onto the console error taxonomy.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<Value, ConsoleError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ConsoleError::Unauthorized);
    }

    if !status.is_success() {
        let message = serde_json::from_slice::<ApiErrorBody>(body)
            .ok()
            .and_then(|body| body.message().map(str::to_string));
        return Err(match message {
            Some(message) => ConsoleError::Status {
                status: status.as_u16(),
                message,
            },
            None => ConsoleError::generic_status(status.as_u16()),
        });
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    let value: Value = serde_json::from_slice(body)?;
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let message = serde_json::from_value::<ApiErrorBody>(value.clone())
            .ok()
            .and_then(|body| body.message().map(str::to_string));
        return Err(match message {
            Some(message) => ConsoleError::Status {
                status: status.as_u16(),
                message,
            },
            None => ConsoleError::generic_status(status.as_u16()),
        });
    }

    Ok(value)
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
