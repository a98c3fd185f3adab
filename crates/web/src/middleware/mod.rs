//! HTTP middleware: sessions and authentication extractors.

pub mod auth;
pub mod session;

pub use auth::{
    RequireAdmin, RequireAnonymous, RequireCustomer, clear_current_user, role_home,
    set_current_user,
};
pub use session::create_session_layer;
