//! Resource registry
//!
//! Every list endpoint the console reads is declared here once, together
//! with whether a global refresh covers it. Cache keys for a resource are
//! its path, optionally followed by a query string, so the path doubles as
//! the invalidation prefix.

use shared::endpoints;

use crate::cache::CacheKey;

/// Server resource readable through the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Products,
    Warehouses,
    Stock,
    Movements,
    Kardex,
    Categories,
    CategoryTree,
    Customers,
    Payments,
    Sales,
    Departments,
    Positions,
    Roles,
    Employees,
    Locations,
    Cities,
}

impl Resource {
    pub const ALL: [Resource; 16] = [
        Resource::Products,
        Resource::Warehouses,
        Resource::Stock,
        Resource::Movements,
        Resource::Kardex,
        Resource::Categories,
        Resource::CategoryTree,
        Resource::Customers,
        Resource::Payments,
        Resource::Sales,
        Resource::Departments,
        Resource::Positions,
        Resource::Roles,
        Resource::Employees,
        Resource::Locations,
        Resource::Cities,
    ];

    /// List endpoint path
    pub fn path(self) -> &'static str {
        match self {
            Resource::Products => endpoints::PRODUCTS,
            Resource::Warehouses => endpoints::WAREHOUSES,
            Resource::Stock => endpoints::STOCK,
            Resource::Movements => endpoints::MOVEMENTS,
            Resource::Kardex => endpoints::KARDEX,
            Resource::Categories => endpoints::CATEGORIES,
            Resource::CategoryTree => endpoints::CATEGORY_TREE,
            Resource::Customers => endpoints::CUSTOMERS,
            Resource::Payments => endpoints::PAYMENTS,
            Resource::Sales => endpoints::SALES,
            Resource::Departments => endpoints::DEPARTMENTS,
            Resource::Positions => endpoints::POSITIONS,
            Resource::Roles => endpoints::ROLES,
            Resource::Employees => endpoints::EMPLOYEES,
            Resource::Locations => endpoints::LOCATIONS,
            Resource::Cities => endpoints::CITIES,
        }
    }

    /// Whether a global refresh (`ErpConsole::refresh_all`) drops this resource.
    ///
    /// Covers sales, products, customers, warehouses, payments and movements.
    /// Movements also covers the kardex, which lives under its path.
    pub fn refresh_on_global(self) -> bool {
        matches!(
            self,
            Resource::Sales
                | Resource::Products
                | Resource::Customers
                | Resource::Warehouses
                | Resource::Payments
                | Resource::Movements
        )
    }

    /// Key of the unfiltered list
    pub fn key(self) -> CacheKey {
        CacheKey::new(self.path())
    }

    /// Key of a filtered list, parameters in the given order
    pub fn key_with<K, V>(self, pairs: impl IntoIterator<Item = (K, V)>) -> CacheKey
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        CacheKey::with_query(self.path(), pairs)
    }

    /// Resources covered by a global refresh
    pub fn global_refresh_set() -> impl Iterator<Item = Resource> {
        Self::ALL.into_iter().filter(|r| r.refresh_on_global())
    }
}
