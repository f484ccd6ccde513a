use super::errors::DomainError;
use super::product::{NewProduct, Product};

/// Storage for products. Implementations own the id sequence and the
/// `created_at` / `updated_at` stamps.
pub trait ProductRepository: Send + Sync + 'static {
    fn list_all(&self) -> Result<Vec<Product>, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError>;
    fn insert(&self, product: NewProduct) -> Result<Product, DomainError>;
    fn replace(&self, id: i32, product: NewProduct) -> Result<Option<Product>, DomainError>;
    fn remove(&self, id: i32) -> Result<bool, DomainError>;
}
