//! Client module - HTTP transports.
//!
//! `NetworkHttpClient` talks to the API over the network;
//! `OneshotHttpClient` drives an axum `Router` in-process.

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

// Re-export main types
pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
