//! Employee, department and position models

use serde::{Deserialize, Serialize};

/// Employee (empleado)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    #[serde(default)]
    pub nombres: Option<String>,
    #[serde(default)]
    pub apellidos: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Department reference (ID)
    #[serde(default)]
    pub departamento: Option<i64>,
    /// Position reference (ID)
    #[serde(default)]
    pub puesto: Option<i64>,
    /// Role reference (ID)
    #[serde(default)]
    pub rol: Option<i64>,
}

/// HR department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
}

/// HR position (puesto)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub departamento: Option<i64>,
}
