use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use bigdecimal::BigDecimal;
use chrono::{Duration, Utc};

use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, Product};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl<T> From<PoisonError<T>> for DomainError {
    fn from(e: PoisonError<T>) -> Self {
        DomainError::Internal(format!("product store lock poisoned: {}", e))
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

struct Store {
    products: Vec<Product>,
    next_id: i32,
}

/// Process-local product store. Every read-modify-write sequence runs under
/// one lock, so concurrent requests never observe a half-applied change.
pub struct InMemoryProductRepository {
    store: Mutex<Store>,
}

impl InMemoryProductRepository {
    pub fn empty() -> Self {
        Self {
            store: Mutex::new(Store {
                products: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Store preloaded with three demo products (ids 1–3).
    pub fn seeded() -> Self {
        let repo = Self::empty();
        {
            let mut store = repo.store.lock().unwrap_or_else(PoisonError::into_inner);
            let now = Utc::now();
            let samples = [
                ("Laptop", "High-performance laptop", "999.99", 50, 30),
                ("Mouse", "Wireless ergonomic mouse", "29.99", 200, 15),
                ("Keyboard", "Mechanical keyboard with RGB lighting", "149.99", 75, 20),
            ];
            for (name, description, price, stock_quantity, age_days) in samples {
                let id = store.next_id;
                store.next_id += 1;
                store.products.push(Product {
                    id,
                    name: name.to_string(),
                    description: Some(description.to_string()),
                    price: BigDecimal::from_str(price).unwrap_or_default(),
                    stock_quantity,
                    created_at: now - Duration::days(age_days),
                    updated_at: None,
                });
            }
        }
        repo
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, DomainError> {
        Ok(self.store.lock()?)
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn list_all(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.lock()?.products.clone())
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError> {
        Ok(self.lock()?.products.iter().find(|p| p.id == id).cloned())
    }

    fn insert(&self, product: NewProduct) -> Result<Product, DomainError> {
        let mut store = self.lock()?;

        let id = store.next_id;
        store.next_id = id
            .checked_add(1)
            .ok_or_else(|| DomainError::Internal("product id sequence exhausted".to_string()))?;

        let created = Product {
            id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock_quantity: product.stock_quantity,
            created_at: Utc::now(),
            updated_at: None,
        };
        store.products.push(created.clone());
        Ok(created)
    }

    fn replace(&self, id: i32, product: NewProduct) -> Result<Option<Product>, DomainError> {
        let mut store = self.lock()?;

        let Some(existing) = store.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        existing.apply(product, Utc::now());
        Ok(Some(existing.clone()))
    }

    fn remove(&self, id: i32) -> Result<bool, DomainError> {
        let mut store = self.lock()?;

        let before = store.products.len();
        store.products.retain(|p| p.id != id);
        Ok(store.products.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Arc;
    use std::thread;

    use bigdecimal::BigDecimal;
    use chrono::Utc;

    use super::InMemoryProductRepository;
    use crate::domain::ports::ProductRepository;
    use crate::domain::product::NewProduct;

    fn make_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: Some("test item".to_string()),
            price: BigDecimal::from_str("4.50").expect("valid decimal"),
            stock_quantity: 3,
        }
    }

    #[test]
    fn seeded_store_holds_three_backdated_products() {
        let repo = InMemoryProductRepository::seeded();

        let products = repo.list_all().expect("list failed");

        let ids: Vec<i32> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(products[0].name, "Laptop");
        assert_eq!(products[1].price, BigDecimal::from_str("29.99").expect("valid decimal"));
        assert!(products.iter().all(|p| p.created_at < Utc::now()));
        assert!(products.iter().all(|p| p.updated_at.is_none()));
    }

    #[test]
    fn insert_assigns_ids_after_seed_data() {
        let repo = InMemoryProductRepository::seeded();

        let first = repo.insert(make_product("a")).expect("insert failed");
        let second = repo.insert(make_product("b")).expect("insert failed");

        assert_eq!(first.id, 4);
        assert_eq!(second.id, 5);
        assert!(first.updated_at.is_none());
    }

    #[test]
    fn ids_are_never_reused_after_delete() {
        let repo = InMemoryProductRepository::seeded();
        let created = repo.insert(make_product("a")).expect("insert failed");

        assert!(repo.remove(created.id).expect("remove failed"));
        let next = repo.insert(make_product("b")).expect("insert failed");

        assert!(next.id > created.id);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let repo = InMemoryProductRepository::empty();
        for name in ["x", "y", "z"] {
            repo.insert(make_product(name)).expect("insert failed");
        }

        let names: Vec<String> = repo
            .list_all()
            .expect("list failed")
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[test]
    fn replace_returns_none_for_unknown_id() {
        let repo = InMemoryProductRepository::seeded();

        let result = repo.replace(999, make_product("ghost")).expect("replace failed");

        assert!(result.is_none());
        assert_eq!(repo.list_all().expect("list failed").len(), 3);
    }

    #[test]
    fn remove_returns_false_for_unknown_id() {
        let repo = InMemoryProductRepository::seeded();

        assert!(!repo.remove(999).expect("remove failed"));
        assert_eq!(repo.list_all().expect("list failed").len(), 3);
    }

    #[test]
    fn concurrent_inserts_get_distinct_ids() {
        let repo = Arc::new(InMemoryProductRepository::empty());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || {
                    (0..25)
                        .map(|j| {
                            repo.insert(make_product(&format!("{}-{}", i, j)))
                                .expect("insert failed")
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<i32> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread panicked"))
            .collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 200);
        assert_eq!(repo.list_all().expect("list failed").len(), 200);
    }
}
