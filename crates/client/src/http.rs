//! The HTTP client seam used by the API facade.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::request::{Method, RequestDescriptor};

/// Executes [`RequestDescriptor`]s and yields the decoded JSON payload.
///
/// Implementations own transport, serialization, status handling, and any
/// retry or cancellation policy. The provided [`get`](Self::get) and
/// [`post`](Self::post) helpers decode the payload into the caller's type.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send one request and return the response payload as raw JSON.
    async fn request(&self, request: RequestDescriptor) -> Result<serde_json::Value, ApiError>;

    /// Send `request` as a `GET` and decode the payload into `T`.
    async fn get<T>(&self, mut request: RequestDescriptor) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        request.method = Method::Get;
        let payload = self.request(request).await?;
        decode(payload)
    }

    /// Send `request` as a `POST` and decode the payload into `T`.
    async fn post<T>(&self, mut request: RequestDescriptor) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        request.method = Method::Post;
        let payload = self.request(request).await?;
        decode(payload)
    }
}

fn decode<T: DeserializeOwned>(payload: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(payload).map_err(ApiError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    /// Echoes the request method and params back as the payload.
    struct Echo;

    #[async_trait]
    impl HttpClient for Echo {
        async fn request(&self, request: RequestDescriptor) -> Result<serde_json::Value, ApiError> {
            Ok(serde_json::json!({
                "method": request.method.as_str(),
                "params": request.params,
            }))
        }
    }

    #[tokio::test]
    async fn get_forces_get_method() {
        let payload: serde_json::Value = Echo
            .get(RequestDescriptor::post("/data/export"))
            .await
            .unwrap();
        assert_eq!(payload["method"], "GET");
    }

    #[tokio::test]
    async fn post_forces_post_method() {
        let payload: serde_json::Value = Echo
            .post(RequestDescriptor::get("/data/annotate"))
            .await
            .unwrap();
        assert_eq!(payload["method"], "POST");
    }

    #[tokio::test]
    async fn mismatched_shape_is_decode_error() {
        let result: Result<Vec<i64>, ApiError> = Echo.get(RequestDescriptor::get("/x")).await;
        assert_matches!(result, Err(ApiError::Decode(_)));
    }
}
