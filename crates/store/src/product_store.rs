use std::sync::{Arc, RwLock};

use chrono::Utc;

use tonecart_catalog::Product;
use tonecart_core::{DomainError, DomainResult, ProductId};

/// Product collection.
///
/// `decrement_stock` is the only write path order processing uses, and it is
/// conditional: the decrement applies only while `stock >= quantity`, checked
/// and written atomically per product. `increment_stock` exists solely as the
/// compensation step when a multi-line reservation has to be unwound.
pub trait ProductStore: Send + Sync {
    fn insert(&self, product: Product) -> DomainResult<()>;
    fn get(&self, id: &ProductId) -> Option<Product>;
    /// All products, in catalog order.
    fn list(&self) -> Vec<Product>;
    /// Atomic conditional decrement. Returns the new stock level, or
    /// `InsufficientStock` without writing anything.
    fn decrement_stock(&self, id: &ProductId, quantity: i64) -> DomainResult<i64>;
    /// Compensating increment (rollback of a prior decrement).
    fn increment_stock(&self, id: &ProductId, quantity: i64) -> DomainResult<i64>;
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn insert(&self, product: Product) -> DomainResult<()> {
        (**self).insert(product)
    }

    fn get(&self, id: &ProductId) -> Option<Product> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<Product> {
        (**self).list()
    }

    fn decrement_stock(&self, id: &ProductId, quantity: i64) -> DomainResult<i64> {
        (**self).decrement_stock(id, quantity)
    }

    fn increment_stock(&self, id: &ProductId, quantity: i64) -> DomainResult<i64> {
        (**self).increment_stock(id, quantity)
    }
}

/// In-memory product collection for tests/dev.
///
/// Backed by a `Vec` so `list` preserves catalog (insertion) order.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductStore for InMemoryProductStore {
    fn insert(&self, product: Product) -> DomainResult<()> {
        let mut products = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("product store poisoned"))?;
        if products.iter().any(|p| p.id == product.id) {
            return Err(DomainError::conflict("product already exists"));
        }
        products.push(product);
        Ok(())
    }

    fn get(&self, id: &ProductId) -> Option<Product> {
        let products = self.inner.read().ok()?;
        products.iter().find(|p| p.id == *id).cloned()
    }

    fn list(&self) -> Vec<Product> {
        match self.inner.read() {
            Ok(products) => products.clone(),
            Err(_) => vec![],
        }
    }

    fn decrement_stock(&self, id: &ProductId, quantity: i64) -> DomainResult<i64> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        let mut products = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("product store poisoned"))?;
        let product = products
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or(DomainError::not_found("product"))?;

        // Check and write under the same lock: stock can never go negative.
        if product.stock < quantity {
            return Err(DomainError::InsufficientStock {
                product_id: id.to_string(),
                requested: quantity,
                available: product.stock,
            });
        }
        product.stock -= quantity;
        product.updated_at = Utc::now();
        Ok(product.stock)
    }

    fn increment_stock(&self, id: &ProductId, quantity: i64) -> DomainResult<i64> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        let mut products = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("product store poisoned"))?;
        let product = products
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or(DomainError::not_found("product"))?;
        product.stock += quantity;
        product.updated_at = Utc::now();
        Ok(product.stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tonecart_catalog::ToneTag;

    fn product(stock: i64) -> Product {
        Product::new(
            ProductId::new(),
            "Dewy Skin Tint",
            "",
            1299,
            stock,
            "makeup",
            vec![ToneTag::new("Tan")],
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn decrement_is_conditional_and_leaves_stock_unchanged_on_shortfall() {
        let store = InMemoryProductStore::new();
        let p = product(1);
        let id = p.id;
        store.insert(p).unwrap();

        let err = store.decrement_stock(&id, 2).unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock { .. }));
        assert_eq!(store.get(&id).unwrap().stock, 1);

        assert_eq!(store.decrement_stock(&id, 1).unwrap(), 0);
        let err = store.decrement_stock(&id, 1).unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock { .. }));
        assert_eq!(store.get(&id).unwrap().stock, 0);
    }

    #[test]
    fn increment_compensates_a_decrement() {
        let store = InMemoryProductStore::new();
        let p = product(5);
        let id = p.id;
        store.insert(p).unwrap();

        store.decrement_stock(&id, 3).unwrap();
        store.increment_stock(&id, 3).unwrap();
        assert_eq!(store.get(&id).unwrap().stock, 5);
    }

    #[test]
    fn list_preserves_catalog_order() {
        let store = InMemoryProductStore::new();
        let first = product(1);
        let second = product(1);
        store.insert(first.clone()).unwrap();
        store.insert(second.clone()).unwrap();
        let listed = store.list();
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);
    }

    #[test]
    fn duplicate_insert_is_a_conflict() {
        let store = InMemoryProductStore::new();
        let p = product(1);
        store.insert(p.clone()).unwrap();
        let err = store.insert(p).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn concurrent_decrements_never_oversell() {
        let store = Arc::new(InMemoryProductStore::new());
        let p = product(100);
        let id = p.id;
        store.insert(p).unwrap();

        let mut handles = Vec::new();
        for _ in 0..150 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                store.decrement_stock(&id, 1).is_ok()
            }));
        }

        let succeeded = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(succeeded, 100);
        assert_eq!(store.get(&id).unwrap().stock, 0);
    }
}
