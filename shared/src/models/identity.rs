//! Authenticated identity: user and company

use serde::{Deserialize, Serialize};

/// Login account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_superuser: bool,
}

/// Tenant company (empresa)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub ruc: Option<String>,
    /// Tenant subdomain, when the company has one
    #[serde(default)]
    pub subdominio: Option<String>,
}
