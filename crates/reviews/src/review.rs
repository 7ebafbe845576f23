use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tonecart_core::{DomainError, DomainResult, ProductId, ReviewId, UserId};

/// Product review document.
///
/// Created once per (user, product) pair — uniqueness is enforced by the
/// review store at insert — and never mutated by this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    /// Integer rating, 1 through 5 inclusive.
    pub rating: u8,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn create(
        id: ReviewId,
        product_id: ProductId,
        user_id: UserId,
        rating: u8,
        body: impl Into<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if !(1..=5).contains(&rating) {
            return Err(DomainError::validation(
                "rating must be between 1 and 5 inclusive",
            ));
        }
        let body = body.into();
        if body.trim().is_empty() {
            return Err(DomainError::validation("review body cannot be empty"));
        }

        Ok(Self {
            id,
            product_id,
            user_id,
            rating,
            body,
            created_at: now,
        })
    }
}

/// Folded view of a product's reviews.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub count: u64,
    /// Mean rating rounded to one decimal; `0` when there are no reviews.
    pub average_rating: f64,
}

/// Fold a product's reviews into a count and mean rating.
pub fn summarize(reviews: &[Review]) -> ReviewSummary {
    if reviews.is_empty() {
        return ReviewSummary {
            count: 0,
            average_rating: 0.0,
        };
    }

    let sum: u64 = reviews.iter().map(|r| u64::from(r.rating)).sum();
    let mean = sum as f64 / reviews.len() as f64;

    ReviewSummary {
        count: reviews.len() as u64,
        average_rating: (mean * 10.0).round() / 10.0,
    }
}
