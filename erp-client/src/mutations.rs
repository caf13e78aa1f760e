//! Mutations
//!
//! Every write follows the same shape: validate locally, send exactly one
//! request, and on success drop the cache keys the write made stale. A
//! rejected or failed write leaves the cache untouched.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::endpoints;
use shared::models::{
    AdjustStockRequest, ChangeLocationRequest, ImageUpload, Product, ProductCreate,
    ReservationKind, ReserveStockRequest, StockItem,
};

use crate::client::HttpClient;
use crate::console::ErpConsole;
use crate::resources::Resource;
use crate::{ClientError, ClientResult};

/// Multipart field carrying product images
pub const IMAGE_FIELD: &str = "imagen";

/// Write operations and the resources each one makes stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    CreateProduct,
    DuplicateProduct,
    UploadProductImage,
    AdjustStock,
    ChangeStockLocation,
    ReserveStock,
}

impl Mutation {
    pub fn name(self) -> &'static str {
        match self {
            Mutation::CreateProduct => "create_product",
            Mutation::DuplicateProduct => "duplicate_product",
            Mutation::UploadProductImage => "upload_product_image",
            Mutation::AdjustStock => "adjust_stock",
            Mutation::ChangeStockLocation => "change_stock_location",
            Mutation::ReserveStock => "reserve_stock",
        }
    }

    /// Resources dropped from the cache after a successful write.
    pub fn invalidates(self) -> &'static [Resource] {
        match self {
            Mutation::CreateProduct | Mutation::DuplicateProduct => &[Resource::Products],
            Mutation::UploadProductImage => &[Resource::Products, Resource::Stock],
            Mutation::AdjustStock => &[Resource::Stock, Resource::Products],
            Mutation::ChangeStockLocation | Mutation::ReserveStock => &[Resource::Stock],
        }
    }
}

// ========== Local validation ==========

fn invalid(message: impl Into<String>) -> ClientError {
    ClientError::Validation(message.into())
}

/// A product needs a non-blank name and a non-negative price.
pub fn validate_product(input: &ProductCreate) -> ClientResult<()> {
    if input.nombre.trim().is_empty() {
        return Err(invalid("El nombre del producto es obligatorio"));
    }
    if input.precio.is_some_and(|p| p < Decimal::ZERO) {
        return Err(invalid("El precio no puede ser negativo"));
    }
    Ok(())
}

/// Images must be non-empty and carry an `image/*` MIME type.
pub fn validate_image(upload: &ImageUpload) -> ClientResult<()> {
    if upload.bytes.is_empty() {
        return Err(invalid("La imagen está vacía"));
    }
    if !upload.mime_type.starts_with("image/") {
        return Err(invalid(format!(
            "Tipo de archivo no soportado: {}",
            upload.mime_type
        )));
    }
    Ok(())
}

/// A non-zero delta whose removal does not exceed the available stock.
pub fn validate_adjustment(item: &StockItem, delta: Decimal) -> ClientResult<()> {
    if delta.is_zero() {
        return Err(invalid("La cantidad del ajuste no puede ser cero"));
    }
    if delta.is_sign_negative() && -delta > item.stock_disponible {
        return Err(invalid(format!(
            "No se pueden retirar {} unidades: solo hay {} disponibles",
            -delta, item.stock_disponible
        )));
    }
    Ok(())
}

/// A positive quantity within what can be reserved or released.
pub fn validate_reservation(
    item: &StockItem,
    kind: ReservationKind,
    quantity: Decimal,
) -> ClientResult<()> {
    if quantity <= Decimal::ZERO {
        return Err(invalid("La cantidad debe ser mayor que cero"));
    }
    match kind {
        ReservationKind::Reservar if quantity > item.stock_disponible => Err(invalid(format!(
            "No se pueden reservar {quantity} unidades: solo hay {} disponibles",
            item.stock_disponible
        ))),
        ReservationKind::Liberar if quantity > item.stock_reservado => Err(invalid(format!(
            "No se pueden liberar {quantity} unidades: solo hay {} reservadas",
            item.stock_reservado
        ))),
        _ => Ok(()),
    }
}

fn non_blank(reason: Option<&str>) -> Option<String> {
    reason
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
}

// ========== Mutation functions ==========

impl<C: HttpClient> ErpConsole<C> {
    /// Finish a write: invalidate on success, log either way, then decode.
    ///
    /// The cache is invalidated before decoding, so a response body the
    /// client cannot read still counts as a completed write.
    fn settle<T: DeserializeOwned>(
        &self,
        mutation: Mutation,
        outcome: ClientResult<Value>,
    ) -> ClientResult<T> {
        let value = match outcome {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(mutation = mutation.name(), error = %e, "mutation failed");
                return Err(e);
            }
        };

        let dropped: usize = mutation
            .invalidates()
            .iter()
            .map(|resource| self.cache.invalidate_prefix(resource.path()))
            .sum();
        tracing::info!(mutation = mutation.name(), dropped, "mutation applied");

        T::deserialize(&value).map_err(|e| {
            ClientError::InvalidResponse(format!("{} response: {e}", mutation.name()))
        })
    }

    fn rejected(mutation: Mutation, error: ClientError) -> ClientError {
        tracing::warn!(mutation = mutation.name(), error = %error, "mutation rejected locally");
        error
    }

    /// Create a product.
    pub async fn create_product(&self, input: &ProductCreate) -> ClientResult<Product> {
        let mutation = Mutation::CreateProduct;
        validate_product(input).map_err(|e| Self::rejected(mutation, e))?;
        let outcome = self.http.post(endpoints::PRODUCTS, input).await;
        self.settle(mutation, outcome)
    }

    /// Server-side copy of a product. Returns the new product.
    pub async fn duplicate_product(&self, id: i64) -> ClientResult<Product> {
        let outcome = self.http.post_empty(&endpoints::duplicate_product(id)).await;
        self.settle(Mutation::DuplicateProduct, outcome)
    }

    /// Upload a product image as multipart field `imagen`.
    pub async fn upload_product_image(&self, id: i64, upload: &ImageUpload) -> ClientResult<Value> {
        let mutation = Mutation::UploadProductImage;
        validate_image(upload).map_err(|e| Self::rejected(mutation, e))?;
        let outcome = self
            .http
            .post_multipart(&endpoints::product_image(id), IMAGE_FIELD, upload)
            .await;
        self.settle(mutation, outcome)
    }

    /// Add `delta` (positive or negative) to the on-hand quantity of `item`.
    pub async fn adjust_stock(
        &self,
        item: &StockItem,
        delta: Decimal,
        reason: &str,
    ) -> ClientResult<Value> {
        let mutation = Mutation::AdjustStock;
        validate_adjustment(item, delta).map_err(|e| Self::rejected(mutation, e))?;
        let body = AdjustStockRequest {
            cantidad: delta,
            motivo: reason.trim().to_string(),
        };
        let outcome = self.http.post(&endpoints::adjust_stock(item.id), &body).await;
        self.settle(mutation, outcome)
    }

    /// Move a stock item to another storage location.
    pub async fn change_stock_location(
        &self,
        item_id: i64,
        location_id: i64,
        reason: Option<&str>,
    ) -> ClientResult<Value> {
        let body = ChangeLocationRequest {
            ubicacion_id: location_id,
            motivo: non_blank(reason),
        };
        let outcome = self
            .http
            .post(&endpoints::change_stock_location(item_id), &body)
            .await;
        self.settle(Mutation::ChangeStockLocation, outcome)
    }

    /// Reserve or release `quantity` units of `item`.
    ///
    /// `cantidad` goes out signed: positive to reserve, negative to release.
    pub async fn reserve_stock(
        &self,
        item: &StockItem,
        kind: ReservationKind,
        quantity: Decimal,
        reason: Option<&str>,
    ) -> ClientResult<Value> {
        let mutation = Mutation::ReserveStock;
        validate_reservation(item, kind, quantity).map_err(|e| Self::rejected(mutation, e))?;
        let body = ReserveStockRequest {
            cantidad: kind.signed(quantity),
            tipo: kind,
            motivo: non_blank(reason),
        };
        let outcome = self.http.post(&endpoints::reserve_stock(item.id), &body).await;
        self.settle(mutation, outcome)
    }
}
