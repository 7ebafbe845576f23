//! `tonecart-store` — storage boundary for the order core.
//!
//! Each collection sits behind a trait so the backend can be swapped; the
//! in-memory implementations here serve dev and tests. The one mandatory
//! concurrency control lives in [`ProductStore::decrement_stock`]: the
//! stock check and the write happen under a single lock, the moral
//! equivalent of `UPDATE ... SET stock = stock - qty WHERE stock >= qty`.

pub mod order_store;
pub mod product_store;
pub mod review_store;
pub mod users;

pub use order_store::{InMemoryOrderStore, OrderStore};
pub use product_store::{InMemoryProductStore, ProductStore};
pub use review_store::{InMemoryReviewStore, ReviewStore};
pub use users::{InMemoryUserDirectory, UserDirectory, UserRecord, UserRole};
