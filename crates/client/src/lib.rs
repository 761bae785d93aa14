//! HTTP client for the X1 dataset and data REST endpoints.
//!
//! [`DatasetApi`](dataset::DatasetApi) maps each backend operation onto a
//! single [`RequestDescriptor`](request::RequestDescriptor) and hands it to an
//! injected [`HttpClient`](http::HttpClient). [`ReqwestClient`](transport::ReqwestClient)
//! is the production implementation of that seam.

pub mod config;
pub mod dataset;
pub mod error;
pub mod http;
pub mod request;
pub mod transport;

pub use dataset::DatasetApi;
pub use error::ApiError;
pub use http::HttpClient;
pub use request::{Method, RequestDescriptor, RequestHeaders};
pub use transport::ReqwestClient;
