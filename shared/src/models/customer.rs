//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer (persona cliente)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    #[serde(default)]
    pub nombres: Option<String>,
    #[serde(default)]
    pub apellidos: Option<String>,
    #[serde(default)]
    pub razon_social: Option<String>,
    #[serde(default)]
    pub identificacion: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    /// City reference (ID)
    #[serde(default)]
    pub ciudad: Option<i64>,
}

impl Customer {
    /// Business name for companies, full name for individuals.
    pub fn display_name(&self) -> String {
        if let Some(razon) = self.razon_social.as_deref().filter(|s| !s.is_empty()) {
            return razon.to_string();
        }
        let full = [self.nombres.as_deref(), self.apellidos.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if full.is_empty() {
            format!("Cliente #{}", self.id)
        } else {
            full
        }
    }
}
