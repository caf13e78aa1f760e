//! Payment and sale models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment (pago)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub monto: Decimal,
    #[serde(default)]
    pub metodo: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    /// Sale reference (ID)
    #[serde(default)]
    pub venta: Option<i64>,
    #[serde(default)]
    pub fecha: Option<String>,
}

/// Sale (venta)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    #[serde(default)]
    pub numero: Option<String>,
    /// Customer reference (ID)
    #[serde(default)]
    pub cliente: Option<i64>,
    pub total: Decimal,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub fecha: Option<String>,
}
