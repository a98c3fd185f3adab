//! Orderdesk web application library.
//!
//! Exposes the application modules so the management CLI and integration
//! tests can reuse configuration, repositories, and route construction.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
