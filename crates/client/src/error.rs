//! Error type shared by the HTTP client seam and the API facade.

/// Errors surfaced by an [`HttpClient`](crate::http::HttpClient).
///
/// The facade never inspects or recovers from these; they reach the caller
/// exactly as the client produced them.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The server answered 2xx but its response envelope carried a failure code.
    #[error("Request rejected ({code}): {message}")]
    Business { code: String, message: String },

    /// Request parameters could not be serialized.
    #[error("Failed to encode request parameters: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The caller's cancellation signal fired before the response arrived.
    #[error("Request cancelled")]
    Cancelled,
}
