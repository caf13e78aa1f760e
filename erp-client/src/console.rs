//! Console context
//!
//! `ErpConsole` bundles the fetch client, the resource cache, the session
//! and the route guard. One instance lives as long as the console session;
//! UI code borrows it to read resources and to run mutations.

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::endpoints;
use shared::models::{
    Category, CategoryNode, City, Customer, Department, Employee, KardexEntry, KardexQuery,
    Location, Movement, Payment, Position, Product, Role, Sale, StockItem, Warehouse,
};
use shared::{ListPayload, LoginRequest, LoginResponse};

use crate::cache::{CacheKey, ResourceCache};
use crate::client::{HttpClient, NetworkHttpClient};
use crate::resources::Resource;
use crate::routing::{RouteDecision, RouteGuard};
use crate::session::Session;
use crate::{ClientConfig, ClientError, ClientResult};

/// Data-synchronization context for one console session
#[derive(Debug)]
pub struct ErpConsole<C: HttpClient = NetworkHttpClient> {
    pub(crate) http: C,
    pub(crate) cache: ResourceCache,
    session: Session,
    route_guard: RouteGuard,
}

impl ErpConsole<NetworkHttpClient> {
    /// Build a console talking to the network API described by `config`.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let http = NetworkHttpClient::new(config)?;
        tracing::info!(base_url = %http.base_url(), "console client ready");
        Ok(Self::with_client(http, config))
    }
}

impl<C: HttpClient> ErpConsole<C> {
    /// Build a console on top of any [`HttpClient`].
    pub fn with_client(http: C, config: &ClientConfig) -> Self {
        Self {
            http,
            cache: ResourceCache::new(config.cache_max_age),
            session: Session::new(),
            route_guard: RouteGuard::new(config.product_domain.clone()),
        }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // ========== Generic reads ==========

    /// Raw payload for `key`, from the cache or the network.
    pub async fn fetch(&self, key: &CacheKey) -> ClientResult<Arc<Value>> {
        self.cache
            .get_or_fetch(key, || self.http.get::<Value>(key.as_str()))
            .await
    }

    /// Refetch `key` now, whether or not it is cached.
    pub async fn revalidate(&self, key: &CacheKey) -> ClientResult<Arc<Value>> {
        self.cache
            .revalidate(key, || self.http.get::<Value>(key.as_str()))
            .await
    }

    /// List read: bare arrays and paginated envelopes both come back as a
    /// plain sequence; unrecognized shapes come back empty.
    pub async fn list<T: DeserializeOwned>(&self, key: &CacheKey) -> ClientResult<Vec<T>> {
        let value = self.fetch(key).await?;
        let payload = ListPayload::decode(&value);
        if !payload.is_recognized() {
            tracing::warn!(key = %key, "unrecognized list payload, showing no records");
        }
        Ok(payload.into_items())
    }

    /// Detail read: a 404 is `Ok(None)` so pages can render their own
    /// not-found state.
    pub async fn detail<T: DeserializeOwned>(&self, key: &CacheKey) -> ClientResult<Option<T>> {
        match self.fetch(key).await {
            Ok(value) => T::deserialize(value.as_ref())
                .map(Some)
                .map_err(|e| ClientError::InvalidResponse(format!("{key}: {e}"))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    // ========== Inventory ==========

    pub async fn products(&self) -> ClientResult<Vec<Product>> {
        self.list(&Resource::Products.key()).await
    }

    pub async fn product(&self, id: i64) -> ClientResult<Option<Product>> {
        self.detail(&CacheKey::new(endpoints::product(id))).await
    }

    pub async fn warehouses(&self) -> ClientResult<Vec<Warehouse>> {
        self.list(&Resource::Warehouses.key()).await
    }

    /// Stock items, optionally filtered by warehouse.
    pub async fn stock(&self, warehouse: Option<i64>) -> ClientResult<Vec<StockItem>> {
        let key = Resource::Stock.key_with(warehouse.map(|id| ("bodega", id.to_string())));
        self.list(&key).await
    }

    pub async fn stock_item(&self, id: i64) -> ClientResult<Option<StockItem>> {
        self.detail(&CacheKey::new(endpoints::stock_item(id))).await
    }

    pub async fn movements(&self) -> ClientResult<Vec<Movement>> {
        self.list(&Resource::Movements.key()).await
    }

    /// Kardex report for a product/warehouse/date range.
    pub async fn kardex(&self, query: &KardexQuery) -> ClientResult<Vec<KardexEntry>> {
        self.list(&Resource::Kardex.key_with(query.to_pairs())).await
    }

    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.list(&Resource::Categories.key()).await
    }

    pub async fn category_tree(&self) -> ClientResult<Vec<CategoryNode>> {
        self.list(&Resource::CategoryTree.key()).await
    }

    /// Storage locations, optionally limited to one warehouse.
    pub async fn locations(&self, warehouse: Option<i64>) -> ClientResult<Vec<Location>> {
        let key = Resource::Locations.key_with(warehouse.map(|id| ("bodega_id", id.to_string())));
        self.list(&key).await
    }

    // ========== Sales and finance ==========

    pub async fn customers(&self) -> ClientResult<Vec<Customer>> {
        self.list(&Resource::Customers.key()).await
    }

    pub async fn payments(&self) -> ClientResult<Vec<Payment>> {
        self.list(&Resource::Payments.key()).await
    }

    pub async fn sales(&self) -> ClientResult<Vec<Sale>> {
        self.list(&Resource::Sales.key()).await
    }

    // ========== HR and security ==========

    pub async fn departments(&self) -> ClientResult<Vec<Department>> {
        self.list(&Resource::Departments.key()).await
    }

    pub async fn positions(&self) -> ClientResult<Vec<Position>> {
        self.list(&Resource::Positions.key()).await
    }

    pub async fn roles(&self) -> ClientResult<Vec<Role>> {
        self.list(&Resource::Roles.key()).await
    }

    pub async fn employees(&self) -> ClientResult<Vec<Employee>> {
        self.list(&Resource::Employees.key()).await
    }

    pub async fn cities(&self) -> ClientResult<Vec<City>> {
        self.list(&Resource::Cities.key()).await
    }

    // ========== Session ==========

    /// Log in, store the token and fill the session.
    ///
    /// On failure the session, token and cache are left untouched.
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<&Session> {
        tracing::info!(username, "logging in");
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = match self.http.post(endpoints::LOGIN, &request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(username, error = %e, "login failed");
                return Err(e);
            }
        };

        self.http.set_token(Some(response.token));
        self.cache.clear();
        self.session
            .set_auth(response.user, response.employee, response.company);
        tracing::info!(username, "logged in");
        Ok(&self.session)
    }

    /// Forget the token and identity, and drop all cached tenant data.
    pub fn logout(&mut self) {
        self.http.set_token(None);
        self.session.clear_auth();
        self.cache.clear();
        tracing::info!("logged out");
    }

    /// Drop every resource flagged for global refresh. Returns the number
    /// of cache keys dropped.
    pub fn refresh_all(&self) -> usize {
        let dropped: usize = Resource::global_refresh_set()
            .map(|resource| self.cache.invalidate_prefix(resource.path()))
            .sum();
        tracing::debug!(dropped, "global refresh");
        dropped
    }

    /// Route check against the current session.
    pub fn check_route(&self, host: &str, path: &str) -> RouteDecision {
        self.route_guard
            .decide(host, path, self.session.is_authenticated())
    }
}
