use std::sync::{Arc, RwLock};

use tonecart_core::{DomainError, DomainResult, ProductId};
use tonecart_reviews::Review;

/// Review collection.
///
/// Insert enforces the one-review-per-(user, product) invariant: the
/// uniqueness check and the write happen under the same lock.
pub trait ReviewStore: Send + Sync {
    fn insert(&self, review: Review) -> DomainResult<()>;
    fn list_for_product(&self, product_id: &ProductId) -> Vec<Review>;
}

impl<S> ReviewStore for Arc<S>
where
    S: ReviewStore + ?Sized,
{
    fn insert(&self, review: Review) -> DomainResult<()> {
        (**self).insert(review)
    }

    fn list_for_product(&self, product_id: &ProductId) -> Vec<Review> {
        (**self).list_for_product(product_id)
    }
}

/// In-memory review collection for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryReviewStore {
    inner: RwLock<Vec<Review>>,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReviewStore for InMemoryReviewStore {
    fn insert(&self, review: Review) -> DomainResult<()> {
        let mut reviews = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("review store poisoned"))?;
        let duplicate = reviews
            .iter()
            .any(|r| r.user_id == review.user_id && r.product_id == review.product_id);
        if duplicate {
            return Err(DomainError::DuplicateReview);
        }
        reviews.push(review);
        Ok(())
    }

    fn list_for_product(&self, product_id: &ProductId) -> Vec<Review> {
        match self.inner.read() {
            Ok(reviews) => reviews
                .iter()
                .filter(|r| r.product_id == *product_id)
                .cloned()
                .collect(),
            Err(_) => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tonecart_core::{ReviewId, UserId};

    fn review(user_id: UserId, product_id: ProductId) -> Review {
        Review::create(
            ReviewId::new(),
            product_id,
            user_id,
            4,
            "Exactly my shade.",
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn second_review_for_same_pair_is_rejected() {
        let store = InMemoryReviewStore::new();
        let user = UserId::new();
        let product = ProductId::new();

        store.insert(review(user, product)).unwrap();
        let err = store.insert(review(user, product)).unwrap_err();
        assert_eq!(err, DomainError::DuplicateReview);
        assert_eq!(store.list_for_product(&product).len(), 1);
    }

    #[test]
    fn same_user_may_review_different_products() {
        let store = InMemoryReviewStore::new();
        let user = UserId::new();
        store.insert(review(user, ProductId::new())).unwrap();
        store.insert(review(user, ProductId::new())).unwrap();
    }

    #[test]
    fn different_users_may_review_the_same_product() {
        let store = InMemoryReviewStore::new();
        let product = ProductId::new();
        store.insert(review(UserId::new(), product)).unwrap();
        store.insert(review(UserId::new(), product)).unwrap();
        assert_eq!(store.list_for_product(&product).len(), 2);
    }
}
