//! [`HttpClient`] implementation backed by [`reqwest`].
//!
//! Joins request paths onto the configured base URL, encodes `GET` params as
//! the query string and `POST` params as a JSON body, races the optional
//! cancellation signal, and unwraps the backend's `{ code, message, data }`
//! response envelope.

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::request::{Method, RequestDescriptor};

/// Envelope code the backend uses for a successful call.
pub const SUCCESS_CODE: &str = "OK";

/// HTTP client for one X1 backend.
pub struct ReqwestClient {
    client: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
}

impl ReqwestClient {
    /// Create a client with its own connection pool and the configured timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
        }
    }

    /// Base URL request paths are appended to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn build(&self, request: &RequestDescriptor) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.api_url, request.url);
        let mut builder = match request.method {
            Method::Get => {
                let builder = self.client.get(url);
                match &request.params {
                    Some(params) => builder.query(&query_pairs(params)),
                    None => builder,
                }
            }
            Method::Post => {
                let builder = self.client.post(url);
                match &request.params {
                    Some(params) => builder.json(params),
                    None => builder,
                }
            }
        };
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn execute(builder: reqwest::RequestBuilder) -> Result<serde_json::Value, ApiError> {
        let response = builder.send().await?;
        let response = Self::ensure_success(response).await?;
        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        let payload = serde_json::from_slice(&body).map_err(ApiError::Decode)?;
        unwrap_envelope(payload)
    }

    /// Return the response unchanged on success, or an [`ApiError::Status`]
    /// with the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn request(&self, request: RequestDescriptor) -> Result<serde_json::Value, ApiError> {
        tracing::debug!(
            method = request.method.as_str(),
            url = %request.url,
            ignore_cancel_token = request.headers.ignore_cancel_token,
            "Sending API request"
        );

        let builder = self.build(&request);
        let result = match request.signal {
            Some(signal) => tokio::select! {
                biased;
                _ = signal.cancelled() => Err(ApiError::Cancelled),
                result = Self::execute(builder) => result,
            },
            None => Self::execute(builder).await,
        };

        if let Err(e) = &result {
            tracing::warn!(
                method = request.method.as_str(),
                url = %request.url,
                error = %e,
                "API request failed"
            );
        }
        result
    }
}

/// Flatten a JSON params object into query pairs.
///
/// Nulls are dropped, arrays repeat the key once per element, and nested
/// objects are sent as their JSON text.
pub fn query_pairs(params: &serde_json::Value) -> Vec<(String, String)> {
    let serde_json::Value::Object(map) = params else {
        return Vec::new();
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            serde_json::Value::Null => {}
            serde_json::Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(item) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(other) {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }
    pairs
}

fn scalar_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Unwrap a `{ code, message, data }` envelope; other payloads pass through.
pub fn unwrap_envelope(payload: serde_json::Value) -> Result<serde_json::Value, ApiError> {
    let mut map = match payload {
        serde_json::Value::Object(map) => map,
        other => return Ok(other),
    };

    let is_envelope = map.contains_key("code")
        && (map.contains_key("data") || map.contains_key("message"));
    if !is_envelope {
        return Ok(serde_json::Value::Object(map));
    }

    let code = match map.get("code") {
        Some(serde_json::Value::String(code)) => code.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    if code == SUCCESS_CODE {
        return Ok(map.remove("data").unwrap_or(serde_json::Value::Null));
    }

    let message = match map.remove("message") {
        Some(serde_json::Value::String(message)) => message,
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    Err(ApiError::Business { code, message })
}
