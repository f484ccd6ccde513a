use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, Product};

pub struct ProductService<R> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_all(&self) -> Result<Vec<Product>, DomainError> {
        self.repo.list_all()
    }

    pub fn get_by_id(&self, id: i32) -> Result<Product, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound(id))
    }

    pub fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        self.repo.insert(product)
    }

    pub fn update(&self, id: i32, product: NewProduct) -> Result<Product, DomainError> {
        self.repo
            .replace(id, product)?
            .ok_or(DomainError::NotFound(id))
    }

    pub fn delete(&self, id: i32) -> Result<(), DomainError> {
        if self.repo.remove(id)? {
            Ok(())
        } else {
            Err(DomainError::NotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::ProductService;
    use crate::domain::errors::DomainError;
    use crate::domain::product::NewProduct;
    use crate::infrastructure::product_repo::InMemoryProductRepository;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            description: None,
            price: BigDecimal::from_str("9.99").expect("valid decimal"),
            stock_quantity: 10,
        }
    }

    #[test]
    fn get_by_id_maps_missing_product_to_not_found() {
        let service = ProductService::new(InMemoryProductRepository::empty());

        let err = service.get_by_id(999).expect_err("should be missing");

        assert!(matches!(err, DomainError::NotFound(999)));
    }

    #[test]
    fn update_unknown_id_leaves_store_untouched() {
        let service = ProductService::new(InMemoryProductRepository::seeded());
        let before = service.list_all().expect("list failed");

        let err = service.update(42, widget()).expect_err("should be missing");

        assert!(matches!(err, DomainError::NotFound(42)));
        assert_eq!(service.list_all().expect("list failed"), before);
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let service = ProductService::new(InMemoryProductRepository::seeded());

        service.delete(2).expect("delete failed");

        assert!(matches!(service.get_by_id(2), Err(DomainError::NotFound(2))));
        assert!(matches!(service.delete(2), Err(DomainError::NotFound(2))));
    }

    #[test]
    fn update_keeps_identity_and_creation_time() {
        let service = ProductService::new(InMemoryProductRepository::seeded());
        let original = service.get_by_id(1).expect("seeded product");

        let updated = service.update(1, widget()).expect("update failed");

        assert_eq!(updated.id, 1);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.name, "Widget");
        assert!(updated.updated_at.is_some());
        assert_eq!(service.get_by_id(1).expect("still there"), updated);
    }
}
