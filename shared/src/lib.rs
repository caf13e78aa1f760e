//! Shared wire types for the ERP console
//!
//! Entity models, list payload envelopes, server error bodies and endpoint
//! paths used by `erp-client` and by anything that needs to speak the
//! console's REST API.

pub mod client;
pub mod endpoints;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse};
pub use response::{ErrorBody, ListPayload, PaginatedEnvelope};
