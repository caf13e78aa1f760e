//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub codigo: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub precio: Option<Decimal>,
    /// Category reference (ID)
    #[serde(default)]
    pub categoria: Option<i64>,
    /// Absolute or server-relative image URL
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default = "default_true")]
    pub activo: bool,
    /// Sum of stock across warehouses, when the list endpoint annotates it
    #[serde(default)]
    pub stock_total: Option<Decimal>,
}

/// Create product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCreate {
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activo: Option<bool>,
}

/// Image file attached to a product via multipart upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    /// e.g. `image/png`
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_decodes_string_decimals() {
        let p: Product = serde_json::from_str(
            r#"{"id": 1, "nombre": "Tornillo", "precio": "12.50", "stock_total": 30}"#,
        )
        .unwrap();
        assert_eq!(p.precio, Some(Decimal::new(1250, 2)));
        assert_eq!(p.stock_total, Some(Decimal::from(30)));
        assert!(p.activo);
    }

    #[test]
    fn create_payload_skips_unset_fields() {
        let body = serde_json::to_value(ProductCreate {
            nombre: "Tuerca".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"nombre": "Tuerca"}));
    }
}
