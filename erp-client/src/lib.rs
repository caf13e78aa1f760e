//! ERP Client - data-synchronization layer for the ERP console
//!
//! Fetches, caches and mutates tenant data served by the ERP REST API, and
//! keeps the authenticated session for one console context.

pub mod cache;
pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod logger;
pub mod mutations;
pub mod pagination;
pub mod resources;
pub mod routing;
pub mod session;

pub use cache::{CacheEvent, CacheKey, ResourceCache};
pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use console::ErpConsole;
pub use error::{ClientError, ClientResult};
pub use mutations::Mutation;
pub use pagination::{Page, Pagination, paginate};
pub use resources::Resource;
pub use routing::{RouteDecision, RouteGuard};
pub use session::Session;

// Re-export shared types for convenience
pub use shared::models;
pub use shared::{LoginRequest, LoginResponse};
