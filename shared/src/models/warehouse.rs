//! Warehouse Model

use serde::{Deserialize, Serialize};

use super::product::default_true;

/// Warehouse (bodega)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub codigo: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default = "default_true")]
    pub activo: bool,
}
