//! Stock Model
//!
//! A stock item is the quantity of one product held in one warehouse. The
//! server keeps `stock_disponible = cantidad - stock_reservado`; the client
//! only computes projections of those numbers to show before a change is
//! confirmed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-warehouse, per-product stock record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: i64,
    /// Product reference (ID)
    pub producto: i64,
    #[serde(default)]
    pub producto_nombre: Option<String>,
    /// Warehouse reference (ID)
    pub bodega: i64,
    #[serde(default)]
    pub bodega_nombre: Option<String>,
    /// Location reference (ID)
    #[serde(default)]
    pub ubicacion: Option<i64>,
    pub cantidad: Decimal,
    #[serde(default)]
    pub stock_reservado: Decimal,
    pub stock_disponible: Decimal,
}

/// Projected quantities after a pending change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockProjection {
    pub cantidad: Decimal,
    pub stock_reservado: Decimal,
    pub stock_disponible: Decimal,
}

impl StockProjection {
    /// Whether the projection keeps every quantity non-negative.
    pub fn is_feasible(&self) -> bool {
        !self.cantidad.is_sign_negative()
            && !self.stock_reservado.is_sign_negative()
            && !self.stock_disponible.is_sign_negative()
    }
}

impl StockItem {
    /// Current quantities as a projection baseline.
    pub fn current(&self) -> StockProjection {
        StockProjection {
            cantidad: self.cantidad,
            stock_reservado: self.stock_reservado,
            stock_disponible: self.stock_disponible,
        }
    }

    /// Quantities after applying `delta` to the on-hand quantity.
    pub fn project_adjustment(&self, delta: Decimal) -> StockProjection {
        let cantidad = self.cantidad + delta;
        StockProjection {
            cantidad,
            stock_reservado: self.stock_reservado,
            stock_disponible: cantidad - self.stock_reservado,
        }
    }

    /// Quantities after reserving or releasing `quantity` units.
    pub fn project_reservation(&self, kind: ReservationKind, quantity: Decimal) -> StockProjection {
        let stock_reservado = self.stock_reservado + kind.signed(quantity);
        StockProjection {
            cantidad: self.cantidad,
            stock_reservado,
            stock_disponible: self.cantidad - stock_reservado,
        }
    }
}

/// Reservation direction sent as `tipo`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationKind {
    /// Move units from available to reserved
    Reservar,
    /// Move units from reserved back to available
    Liberar,
}

impl ReservationKind {
    /// Apply the direction's sign to a positive quantity.
    pub fn signed(self, quantity: Decimal) -> Decimal {
        match self {
            ReservationKind::Reservar => quantity,
            ReservationKind::Liberar => -quantity,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReservationKind::Reservar => "reservar",
            ReservationKind::Liberar => "liberar",
        }
    }
}

/// Body of `POST /api/stock/{id}/ajustar_stock/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustStockRequest {
    /// Signed delta applied to the on-hand quantity
    pub cantidad: Decimal,
    pub motivo: String,
}

/// Body of `POST /api/stock/{id}/cambiar-ubicacion/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeLocationRequest {
    pub ubicacion_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
}

/// Body of `POST /api/stock/{id}/reservar_stock/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveStockRequest {
    /// Positive for `reservar`, negative for `liberar`
    pub cantidad: Decimal,
    pub tipo: ReservationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(cantidad: i64, reservado: i64) -> StockItem {
        StockItem {
            id: 1,
            producto: 10,
            producto_nombre: None,
            bodega: 2,
            bodega_nombre: None,
            ubicacion: None,
            cantidad: Decimal::from(cantidad),
            stock_reservado: Decimal::from(reservado),
            stock_disponible: Decimal::from(cantidad - reservado),
        }
    }

    #[test]
    fn reservation_moves_units_between_buckets() {
        let stock = item(20, 5);

        let reserved = stock.project_reservation(ReservationKind::Reservar, Decimal::from(4));
        assert_eq!(reserved.stock_reservado, Decimal::from(9));
        assert_eq!(reserved.stock_disponible, Decimal::from(11));
        assert_eq!(reserved.cantidad, Decimal::from(20));

        let released = stock.project_reservation(ReservationKind::Liberar, Decimal::from(5));
        assert_eq!(released.stock_reservado, Decimal::ZERO);
        assert_eq!(released.stock_disponible, Decimal::from(20));
        assert!(released.is_feasible());
    }

    #[test]
    fn over_release_is_infeasible() {
        let stock = item(20, 5);
        let p = stock.project_reservation(ReservationKind::Liberar, Decimal::from(6));
        assert!(!p.is_feasible());
    }

    #[test]
    fn adjustment_keeps_available_consistent() {
        let stock = item(10, 0);
        let p = stock.project_adjustment(Decimal::from(-5));
        assert_eq!(p.cantidad, Decimal::from(5));
        assert_eq!(p.stock_disponible, p.cantidad - p.stock_reservado);
        assert!(!stock.project_adjustment(Decimal::from(-20)).is_feasible());
    }

    #[test]
    fn reserve_request_wire_shape() {
        let body = serde_json::to_value(ReserveStockRequest {
            cantidad: ReservationKind::Liberar.signed(Decimal::from(3)),
            tipo: ReservationKind::Liberar,
            motivo: None,
        })
        .unwrap();
        assert_eq!(body["tipo"], "liberar");
        assert_eq!(body["cantidad"], "-3");
        assert!(body.get("motivo").is_none());
    }
}
