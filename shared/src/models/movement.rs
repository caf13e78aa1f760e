//! Inventory movement and kardex models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inventory movement (entrada, salida, ajuste, transferencia, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: i64,
    pub producto: i64,
    pub bodega: i64,
    pub tipo: String,
    pub cantidad: Decimal,
    #[serde(default)]
    pub motivo: Option<String>,
    /// ISO-8601 timestamp as sent by the server
    #[serde(default)]
    pub fecha: Option<String>,
}

/// One kardex line: a movement plus the running balance after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KardexEntry {
    #[serde(flatten)]
    pub movimiento: Movement,
    pub saldo: Decimal,
}

/// Filter for the kardex report
///
/// All fields are optional; unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KardexQuery {
    pub producto: Option<i64>,
    pub bodega: Option<i64>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
}

impl KardexQuery {
    pub fn for_product(producto: i64) -> Self {
        Self {
            producto: Some(producto),
            ..Self::default()
        }
    }

    pub fn in_warehouse(mut self, bodega: i64) -> Self {
        self.bodega = Some(bodega);
        self
    }

    pub fn between(mut self, inicio: NaiveDate, fin: NaiveDate) -> Self {
        self.fecha_inicio = Some(inicio);
        self.fecha_fin = Some(fin);
        self
    }

    /// Query pairs in a fixed order; dates as `YYYY-MM-DD`.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(producto) = self.producto {
            pairs.push(("producto", producto.to_string()));
        }
        if let Some(bodega) = self.bodega {
            pairs.push(("bodega", bodega.to_string()));
        }
        if let Some(inicio) = self.fecha_inicio {
            pairs.push(("fecha_inicio", inicio.format("%Y-%m-%d").to_string()));
        }
        if let Some(fin) = self.fecha_fin {
            pairs.push(("fecha_fin", fin.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kardex_pairs_keep_fixed_order() {
        let query = KardexQuery::for_product(7)
            .between(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )
            .in_warehouse(2);
        let pairs = query.to_pairs();
        let keys: Vec<_> = pairs.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["producto", "bodega", "fecha_inicio", "fecha_fin"]);
        assert_eq!(pairs[2].1, "2024-01-01");
    }

    #[test]
    fn kardex_entry_flattens_movement() {
        let entry: KardexEntry = serde_json::from_str(
            r#"{"id": 1, "producto": 7, "bodega": 2, "tipo": "entrada",
                "cantidad": "5", "saldo": "15", "fecha": "2024-01-02T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(entry.movimiento.tipo, "entrada");
        assert_eq!(entry.saldo, Decimal::from(15));
    }
}
