use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

/// Product fields as submitted, before any rule has been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub stock_quantity: i32,
}

/// Fields a caller may set on a product. Only built from validated input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub stock_quantity: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Replaces every mutable field, keeping `id` and `created_at`.
    pub fn apply(&mut self, changes: NewProduct, now: DateTime<Utc>) {
        self.name = changes.name;
        self.description = changes.description;
        self.price = changes.price;
        self.stock_quantity = changes.stock_quantity;
        self.updated_at = Some(now);
    }
}
