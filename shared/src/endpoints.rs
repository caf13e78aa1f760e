//! REST endpoint paths
//!
//! Paths are relative to the API base URL and keep the trailing slash the
//! server routes expect. List paths double as cache-key prefixes.

pub const PRODUCTS: &str = "/api/productos/";
pub const WAREHOUSES: &str = "/api/bodegas/";
pub const STOCK: &str = "/api/stock/";
pub const MOVEMENTS: &str = "/api/movimientos-inventario/";
pub const KARDEX: &str = "/api/movimientos-inventario/kardex/";
pub const CATEGORIES: &str = "/api/categorias/";
pub const CATEGORY_TREE: &str = "/api/categorias/arbol_expandido/";
pub const CUSTOMERS: &str = "/api/personas/clientes/";
pub const PAYMENTS: &str = "/api/pagos/";
pub const SALES: &str = "/api/ventas/";
pub const DEPARTMENTS: &str = "/api/rrhh/departamentos/";
pub const POSITIONS: &str = "/api/rrhh/puestos/";
pub const ROLES: &str = "/api/seguridad/roles/";
pub const EMPLOYEES: &str = "/api/seguridad/empleados/";
pub const LOCATIONS: &str = "/api/ubicaciones/";
pub const CITIES: &str = "/api/core/ciudades/";
pub const LOGIN: &str = "/api/auth/login/";

/// `/api/productos/{id}/`
pub fn product(id: i64) -> String {
    format!("{PRODUCTS}{id}/")
}

/// `/api/productos/{id}/duplicar/`
pub fn duplicate_product(id: i64) -> String {
    format!("{PRODUCTS}{id}/duplicar/")
}

/// `/api/productos/{id}/imagen/` (multipart, field `imagen`)
pub fn product_image(id: i64) -> String {
    format!("{PRODUCTS}{id}/imagen/")
}

/// `/api/stock/{id}/`
pub fn stock_item(id: i64) -> String {
    format!("{STOCK}{id}/")
}

/// `/api/stock/{id}/ajustar_stock/`
pub fn adjust_stock(id: i64) -> String {
    format!("{STOCK}{id}/ajustar_stock/")
}

/// `/api/stock/{id}/cambiar-ubicacion/`
pub fn change_stock_location(id: i64) -> String {
    format!("{STOCK}{id}/cambiar-ubicacion/")
}

/// `/api/stock/{id}/reservar_stock/`
pub fn reserve_stock(id: i64) -> String {
    format!("{STOCK}{id}/reservar_stock/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_actions_are_nested_under_the_item() {
        assert_eq!(adjust_stock(9), "/api/stock/9/ajustar_stock/");
        assert_eq!(change_stock_location(9), "/api/stock/9/cambiar-ubicacion/");
        assert_eq!(reserve_stock(9), "/api/stock/9/reservar_stock/");
        assert!(adjust_stock(9).starts_with(STOCK));
    }

    #[test]
    fn product_paths() {
        assert_eq!(product(4), "/api/productos/4/");
        assert_eq!(duplicate_product(4), "/api/productos/4/duplicar/");
        assert_eq!(product_image(4), "/api/productos/4/imagen/");
    }
}
