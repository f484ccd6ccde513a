use std::collections::BTreeMap;

use bigdecimal::BigDecimal;

use crate::domain::product::{NewProduct, ProductInput};

/// Field-keyed validation failures. Every rule is checked; nothing
/// short-circuits on the first failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }
}

pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

/// Checks create/update input and turns it into a `NewProduct`.
pub fn validate_product(request: ProductInput) -> Result<NewProduct, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if is_blank(request.name.as_deref()) {
        errors.add("Name", "The Name field is required.");
    }
    if request.price < BigDecimal::from(0) {
        errors.add("Price", "The Price field must be greater than or equal to 0.");
    }
    if request.stock_quantity < 0 {
        errors.add(
            "StockQuantity",
            "The StockQuantity field must be greater than or equal to 0.",
        );
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewProduct {
        name: request.name.unwrap_or_default(),
        description: request.description,
        price: request.price,
        stock_quantity: request.stock_quantity,
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn request(name: Option<&str>, price: &str, stock_quantity: i32) -> ProductInput {
        ProductInput {
            name: name.map(str::to_string),
            description: None,
            price: BigDecimal::from_str(price).expect("valid decimal"),
            stock_quantity,
        }
    }

    #[test]
    fn valid_request_becomes_new_product() {
        let product = validate_product(request(Some("Widget"), "9.99", 10)).expect("valid");

        assert_eq!(product.name, "Widget");
        assert_eq!(product.stock_quantity, 10);
    }

    #[test]
    fn zero_price_and_stock_are_allowed() {
        assert!(validate_product(request(Some("Freebie"), "0", 0)).is_ok());
    }

    #[test]
    fn every_violation_is_reported() {
        let errors = validate_product(request(Some(""), "-1", -1)).expect_err("invalid");

        let keys: Vec<&str> = errors.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Name", "Price", "StockQuantity"]);
        assert!(errors.fields().values().all(|messages| messages.len() == 1));
    }

    #[test]
    fn whitespace_or_missing_name_is_required() {
        for name in [None, Some("   ")] {
            let errors = validate_product(request(name, "1", 1)).expect_err("invalid");
            assert_eq!(
                errors.fields()["Name"],
                vec!["The Name field is required.".to_string()]
            );
        }
    }

    #[test]
    fn messages_accumulate_per_field_in_order() {
        let mut errors = ValidationErrors::new();
        errors.add("Email", "first");
        errors.add("Email", "second");

        assert_eq!(errors.fields()["Email"], vec!["first", "second"]);
    }
}
