//! `tonecart-orders` — order lifecycle domain.
//!
//! Owns the order record, the status state machine, and the tracking write
//! gate. Inventory effects happen at creation time only; status transitions
//! never touch stock.

pub mod order;
pub mod status;

pub use order::{
    Order, OrderLine, OrderLineRequest, PaymentMethod, ShippingAddress, TrackingInfo,
};
pub use status::OrderStatus;
