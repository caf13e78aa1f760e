//! Location and city models

use serde::{Deserialize, Serialize};

/// Storage location inside a warehouse (ubicación)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    #[serde(default)]
    pub codigo: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
    /// Warehouse reference (ID)
    #[serde(default)]
    pub bodega: Option<i64>,
}

impl Location {
    /// Label used by pickers: code, then name, then the bare ID.
    pub fn label(&self) -> String {
        match (&self.codigo, &self.nombre) {
            (Some(codigo), Some(nombre)) => format!("{codigo} - {nombre}"),
            (Some(codigo), None) => codigo.clone(),
            (None, Some(nombre)) => nombre.clone(),
            (None, None) => format!("#{}", self.id),
        }
    }
}

/// City
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub provincia: Option<String>,
}
