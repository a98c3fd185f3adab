//! Domain models.

pub mod customer;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use customer::Customer;
pub use order::Order;
pub use product::Product;
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
