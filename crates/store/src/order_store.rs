use std::sync::{Arc, RwLock};

use tonecart_core::{DomainError, DomainResult, OrderId, UserId};
use tonecart_orders::Order;

/// Order collection.
///
/// Orders are inserted once and mutated only through `update`, which applies
/// a domain closure under the write lock — the single-point optimistic check
/// for status transitions and tracking writes. Orders are never deleted by
/// normal flow.
pub trait OrderStore: Send + Sync {
    fn insert(&self, order: Order) -> DomainResult<()>;
    fn get(&self, id: &OrderId) -> Option<Order>;
    /// All orders, in creation order.
    fn list(&self) -> Vec<Order>;
    fn list_for_user(&self, user_id: &UserId) -> Vec<Order>;
    /// Mutate one order atomically. The closure sees current state; if it
    /// fails, nothing is written and the error surfaces unchanged.
    fn update(
        &self,
        id: &OrderId,
        apply: &dyn Fn(&mut Order) -> DomainResult<()>,
    ) -> DomainResult<Order>;
}

impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    fn insert(&self, order: Order) -> DomainResult<()> {
        (**self).insert(order)
    }

    fn get(&self, id: &OrderId) -> Option<Order> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<Order> {
        (**self).list()
    }

    fn list_for_user(&self, user_id: &UserId) -> Vec<Order> {
        (**self).list_for_user(user_id)
    }

    fn update(
        &self,
        id: &OrderId,
        apply: &dyn Fn(&mut Order) -> DomainResult<()>,
    ) -> DomainResult<Order> {
        (**self).update(id, apply)
    }
}

/// In-memory order collection for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    inner: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn insert(&self, order: Order) -> DomainResult<()> {
        let mut orders = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("order store poisoned"))?;
        if orders.iter().any(|o| o.id() == order.id()) {
            return Err(DomainError::conflict("order already exists"));
        }
        orders.push(order);
        Ok(())
    }

    fn get(&self, id: &OrderId) -> Option<Order> {
        let orders = self.inner.read().ok()?;
        orders.iter().find(|o| o.id() == *id).cloned()
    }

    fn list(&self) -> Vec<Order> {
        match self.inner.read() {
            Ok(orders) => orders.clone(),
            Err(_) => vec![],
        }
    }

    fn list_for_user(&self, user_id: &UserId) -> Vec<Order> {
        match self.inner.read() {
            Ok(orders) => orders
                .iter()
                .filter(|o| o.user_id() == *user_id)
                .cloned()
                .collect(),
            Err(_) => vec![],
        }
    }

    fn update(
        &self,
        id: &OrderId,
        apply: &dyn Fn(&mut Order) -> DomainResult<()>,
    ) -> DomainResult<Order> {
        let mut orders = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("order store poisoned"))?;
        let order = orders
            .iter_mut()
            .find(|o| o.id() == *id)
            .ok_or(DomainError::not_found("order"))?;
        apply(order)?;
        Ok(order.clone())
    }
}
