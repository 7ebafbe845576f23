//! `tonecart-api` — HTTP surface of the storefront order core.

pub mod app;
pub mod context;
pub mod middleware;
