//! Role Model

use serde::{Deserialize, Serialize};

/// Security role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    /// Permission codenames granted to the role
    #[serde(default)]
    pub permisos: Vec<String>,
}

impl Role {
    pub fn has_permission(&self, codename: &str) -> bool {
        self.permisos.iter().any(|p| p == codename)
    }
}
