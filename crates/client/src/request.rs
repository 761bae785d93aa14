//! Request descriptors handed to an [`HttpClient`](crate::http::HttpClient).
//!
//! A [`RequestDescriptor`] is the complete, transport-agnostic description
//! of one outbound call: verb, path, JSON parameters, header flags, and an
//! optional cancellation signal.

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::ApiError;

/// Path prefix of dataset-level operations.
pub const DATASET_PREFIX: &str = "/dataset";

/// Path prefix of data-item, frame, and annotation operations.
pub const DATA_PREFIX: &str = "/data";

/// HTTP verb of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Per-request header flags interpreted by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestHeaders {
    /// Exempt this request from the client's same-route auto-cancellation.
    pub ignore_cancel_token: bool,
}

impl Default for RequestHeaders {
    fn default() -> Self {
        Self {
            ignore_cancel_token: true,
        }
    }
}

/// One outbound request.
///
/// `url` is relative to the client's base URL. For `GET` the `params` are
/// sent as the query string, for `POST` as the JSON body.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub params: Option<serde_json::Value>,
    pub headers: RequestHeaders,
    pub signal: Option<CancellationToken>,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: None,
            headers: RequestHeaders::default(),
            signal: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    /// Attach parameters, serialized as-is without renaming or filtering.
    pub fn with_params<P: Serialize + ?Sized>(mut self, params: &P) -> Result<Self, ApiError> {
        self.params = Some(serde_json::to_value(params).map_err(ApiError::Encode)?);
        Ok(self)
    }

    /// Forward an optional cancellation signal unchanged.
    pub fn with_signal(mut self, signal: Option<CancellationToken>) -> Self {
        self.signal = signal;
        self
    }
}
