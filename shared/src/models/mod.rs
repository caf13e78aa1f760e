//! Data models
//!
//! Wire shapes of the console's REST API. Field names follow the JSON the
//! server sends. All IDs are `i64`; quantities and money are `Decimal`.

pub mod category;
pub mod customer;
pub mod employee;
pub mod identity;
pub mod location;
pub mod movement;
pub mod payment;
pub mod product;
pub mod role;
pub mod stock;
pub mod warehouse;

// Re-exports
pub use category::*;
pub use customer::*;
pub use employee::*;
pub use identity::*;
pub use location::*;
pub use movement::*;
pub use payment::*;
pub use product::*;
pub use role::*;
pub use stock::*;
pub use warehouse::*;
