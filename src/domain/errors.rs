use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Product {0} not found")]
    NotFound(i32),
    #[error("Internal error: {0}")]
    Internal(String),
}
