use std::sync::Arc;

use chrono::Utc;

use tonecart_catalog::{Product, ToneTag};
use tonecart_core::{DomainError, DomainResult, OrderId, ProductId, ReviewId, UserId};
use tonecart_orders::{
    Order, OrderLine, OrderLineRequest, OrderStatus, PaymentMethod, ShippingAddress, TrackingInfo,
};
use tonecart_reviews::{summarize, Review, ReviewSummary};
use tonecart_store::{
    InMemoryOrderStore, InMemoryProductStore, InMemoryReviewStore, InMemoryUserDirectory,
    OrderStore, ProductStore, ReviewStore, UserDirectory,
};

/// Service layer over the stores. One instance per process, shared via
/// `Extension<Arc<AppServices>>`.
pub struct AppServices {
    products: Arc<dyn ProductStore>,
    orders: Arc<dyn OrderStore>,
    reviews: Arc<dyn ReviewStore>,
    users: Arc<dyn UserDirectory>,
}

/// Default wiring: in-memory stores.
pub fn build_services() -> AppServices {
    AppServices::new(
        Arc::new(InMemoryProductStore::new()),
        Arc::new(InMemoryOrderStore::new()),
        Arc::new(InMemoryReviewStore::new()),
        Arc::new(InMemoryUserDirectory::new()),
    )
}

impl AppServices {
    pub fn new(
        products: Arc<dyn ProductStore>,
        orders: Arc<dyn OrderStore>,
        reviews: Arc<dyn ReviewStore>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            products,
            orders,
            reviews,
            users,
        }
    }

    /// Store handle for out-of-band catalog seeding. Catalog writes are owned
    /// by the merchandising pipeline, not by this API.
    pub fn products(&self) -> &Arc<dyn ProductStore> {
        &self.products
    }

    /// Directory handle for out-of-band user seeding (auth/profile service
    /// owns user accounts).
    pub fn users(&self) -> &Arc<dyn UserDirectory> {
        &self.users
    }

    // --- orders -----------------------------------------------------------

    /// Create an order: snapshot catalog state, then commit stock.
    ///
    /// Phase 1 resolves every line against the catalog and snapshots name and
    /// price, failing fast on unknown products, zero quantities, and visible
    /// shortfalls. Phase 2 applies the conditional decrements one line at a
    /// time; losing a race on any line unwinds the decrements already applied
    /// and fails the whole order with `InsufficientStock`. Only after every
    /// line is committed does the order record exist.
    pub fn create_order(
        &self,
        user_id: UserId,
        lines: Vec<OrderLineRequest>,
        shipping_address: ShippingAddress,
        shipping_fee: u64,
        payment_method: PaymentMethod,
    ) -> DomainResult<Order> {
        self.users
            .get(&user_id)
            .ok_or(DomainError::not_found("user"))?;
        if lines.is_empty() {
            return Err(DomainError::validation(
                "order must contain at least one line",
            ));
        }

        // Phase 1: resolve and snapshot. No writes yet.
        let mut snapshots = Vec::with_capacity(lines.len());
        for line in &lines {
            if line.quantity == 0 {
                return Err(DomainError::validation("line quantity must be at least 1"));
            }
            let product = self
                .products
                .get(&line.product_id)
                .ok_or(DomainError::not_found("product"))?;
            let requested = i64::from(line.quantity);
            if product.stock < requested {
                return Err(DomainError::InsufficientStock {
                    product_id: line.product_id.to_string(),
                    requested,
                    available: product.stock,
                });
            }
            snapshots.push(OrderLine {
                product_id: line.product_id,
                product_name: product.name,
                quantity: line.quantity,
                unit_price: product.price,
            });
        }

        // Phase 2: commit. Each decrement is individually atomic; a lost race
        // mid-order unwinds the lines already taken.
        let mut committed: Vec<(ProductId, i64)> = Vec::with_capacity(snapshots.len());
        for line in &snapshots {
            let quantity = i64::from(line.quantity);
            match self.products.decrement_stock(&line.product_id, quantity) {
                Ok(_) => committed.push((line.product_id, quantity)),
                Err(err) => {
                    self.release_committed(&committed);
                    return Err(err);
                }
            }
        }

        let order = match Order::create(
            OrderId::new(),
            user_id,
            snapshots,
            shipping_address,
            shipping_fee,
            payment_method,
            Utc::now(),
        ) {
            Ok(order) => order,
            Err(err) => {
                self.release_committed(&committed);
                return Err(err);
            }
        };

        if let Err(err) = self.orders.insert(order.clone()) {
            self.release_committed(&committed);
            return Err(err);
        }

        tracing::info!(
            order_id = %order.id(),
            user_id = %user_id,
            lines = order.lines().len(),
            total_price = order.total_price(),
            "order created"
        );
        Ok(order)
    }

    fn release_committed(&self, committed: &[(ProductId, i64)]) {
        for (product_id, quantity) in committed {
            if let Err(err) = self.products.increment_stock(product_id, *quantity) {
                // Stock restore can only fail if the product vanished from
                // the store mid-flight; log and keep unwinding.
                tracing::warn!(
                    product_id = %product_id,
                    quantity,
                    error = %err,
                    "failed to restore stock while unwinding order"
                );
            }
        }
    }

    pub fn get_order(&self, id: &OrderId) -> DomainResult<Order> {
        self.orders.get(id).ok_or(DomainError::not_found("order"))
    }

    pub fn list_orders(&self) -> Vec<Order> {
        self.orders.list()
    }

    pub fn list_orders_for_user(&self, user_id: &UserId) -> Vec<Order> {
        self.orders.list_for_user(user_id)
    }

    /// Apply a status transition under the store's write lock.
    pub fn transition_order(&self, id: &OrderId, target: OrderStatus) -> DomainResult<Order> {
        let order = self
            .orders
            .update(id, &|order| order.transition(target, Utc::now()))?;
        tracing::info!(order_id = %id, status = %target, "order status updated");
        Ok(order)
    }

    /// Attach or overwrite tracking; rejected unless the order is `shipped`.
    pub fn set_tracking(&self, id: &OrderId, tracking: TrackingInfo) -> DomainResult<Order> {
        let order = self
            .orders
            .update(id, &|order| order.set_tracking(tracking.clone(), Utc::now()))?;
        tracing::info!(order_id = %id, carrier = %tracking.carrier, "tracking set");
        Ok(order)
    }

    // --- recommendations ---------------------------------------------------

    /// Products suggesting `tone`, in catalog order.
    pub fn recommended_by_tone(&self, tone: &ToneTag) -> Vec<Product> {
        self.products
            .list()
            .into_iter()
            .filter(|p| p.suggests(tone))
            .collect()
    }

    /// Recommendations keyed on the user's questionnaire tone. Unknown user
    /// is an error; a user who never answered the questionnaire gets an
    /// empty list.
    pub fn recommended_for_user(&self, user_id: &UserId) -> DomainResult<Vec<Product>> {
        let user = self
            .users
            .get(user_id)
            .ok_or(DomainError::not_found("user"))?;
        Ok(match user.skin_tone {
            Some(tone) => self.recommended_by_tone(&tone),
            None => vec![],
        })
    }

    // --- reviews ------------------------------------------------------------

    pub fn submit_review(
        &self,
        user_id: UserId,
        product_id: ProductId,
        rating: u8,
        body: String,
    ) -> DomainResult<Review> {
        self.users
            .get(&user_id)
            .ok_or(DomainError::not_found("user"))?;
        self.products
            .get(&product_id)
            .ok_or(DomainError::not_found("product"))?;

        let review = Review::create(ReviewId::new(), product_id, user_id, rating, body, Utc::now())?;
        self.reviews.insert(review.clone())?;
        tracing::info!(review_id = %review.id, product_id = %product_id, "review submitted");
        Ok(review)
    }

    /// Summary plus the underlying reviews for a product page.
    pub fn reviews_for_product(
        &self,
        product_id: &ProductId,
    ) -> DomainResult<(ReviewSummary, Vec<Review>)> {
        self.products
            .get(product_id)
            .ok_or(DomainError::not_found("product"))?;
        let reviews = self.reviews.list_for_product(product_id);
        Ok((summarize(&reviews), reviews))
    }

    // --- catalog reads ------------------------------------------------------

    pub fn get_product(&self, id: &ProductId) -> DomainResult<Product> {
        self.products
            .get(id)
            .ok_or(DomainError::not_found("product"))
    }

    pub fn list_products(&self) -> Vec<Product> {
        self.products.list()
    }
}
