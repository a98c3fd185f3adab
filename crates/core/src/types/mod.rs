//! Shared type definitions.

pub mod email;
pub mod id;
pub mod price;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{CustomerId, OrderId, ProductId, UserId};
pub use price::Price;
pub use role::Role;
pub use status::OrderStatus;
