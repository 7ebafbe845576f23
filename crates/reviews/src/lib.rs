//! `tonecart-reviews` — product review domain.

pub mod review;

pub use review::{summarize, Review, ReviewSummary};
