//! Auth DTOs shared between the API and the console client

use serde::{Deserialize, Serialize};

use crate::models::{Company, Employee, User};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
///
/// `employee` and `company` are absent for platform-level accounts that are
/// not attached to a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
    #[serde(default, alias = "empleado")]
    pub employee: Option<Employee>,
    #[serde(default, alias = "empresa")]
    pub company: Option<Company>,
}
