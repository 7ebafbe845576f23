//! `tonecart-catalog` — product catalog domain.
//!
//! Read-mostly: the order core only ever mutates `stock`, and only downward
//! through the store's conditional decrement.

pub mod product;
pub mod tone;

pub use product::Product;
pub use tone::ToneTag;
