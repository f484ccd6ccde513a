use actix_web::{http::header, web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::product_service::ProductService;
use crate::domain::product::{Product, ProductInput};
use crate::errors::AppError;
use crate::infrastructure::product_repo::InMemoryProductRepository;
use crate::problem::{ProblemDetails, ValidationProblemDetails};
use crate::validation::validate_product;

pub type AppProductService = ProductService<InMemoryProductRepository>;

pub const BASE_PATH: &str = "/api/products";

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Body for both create and update. Every field is optional on the wire so
/// that all problems can be reported together.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Must be zero or greater
    #[serde(default, deserialize_with = "json_decimal::deserialize")]
    #[schema(value_type = f64, example = 9.99)]
    pub price: BigDecimal,
    /// Must be zero or greater
    #[serde(default)]
    pub stock_quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(serialize_with = "json_decimal::serialize")]
    #[schema(value_type = f64, example = 9.99)]
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ProductRequest> for ProductInput {
    fn from(r: ProductRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            price: r.price,
            stock_quantity: r.stock_quantity,
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            stock_quantity: p.stock_quantity,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Prices travel as plain JSON numbers and are held as exact decimals.
/// Relies on serde_json's `arbitrary_precision`, so the number's source text
/// reaches `BigDecimal` without passing through `f64`.
mod json_decimal {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
        serde_json::Number::from_str(&value.to_string())
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigDecimal, D::Error> {
        let n = serde_json::Number::deserialize(deserializer)?;
        BigDecimal::from_str(&n.to_string()).map_err(de::Error::custom)
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/products
///
/// Retrieves a list of all products in the inventory.
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products", body = Vec<ProductResponse>),
    ),
    tag = "Products"
)]
pub async fn list_products(
    service: web::Data<AppProductService>,
) -> Result<HttpResponse, AppError> {
    let products: Vec<ProductResponse> = service
        .list_all()?
        .into_iter()
        .map(ProductResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(products))
}

/// GET /api/products/{id}
///
/// Retrieves a specific product by its unique identifier.
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "The unique identifier of the product"),
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found", body = ProblemDetails, content_type = "application/problem+json"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    service: web::Data<AppProductService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let product = service.get_by_id(path.into_inner())?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// POST /api/products
///
/// Creates a new product in the inventory. The `Location` header points at
/// the new product.
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation failed", body = ValidationProblemDetails, content_type = "application/problem+json"),
    ),
    tag = "Products"
)]
pub async fn create_product(
    service: web::Data<AppProductService>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let new_product = validate_product(body.into_inner().into())?;
    let product = service.create(new_product)?;

    log::info!("Created product with ID {}", product.id);

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("{}/{}", BASE_PATH, product.id)))
        .json(ProductResponse::from(product)))
}

/// PUT /api/products/{id}
///
/// Replaces every mutable field of an existing product.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "The unique identifier of the product to update"),
    ),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Validation failed", body = ValidationProblemDetails, content_type = "application/problem+json"),
        (status = 404, description = "Product not found", body = ProblemDetails, content_type = "application/problem+json"),
    ),
    tag = "Products"
)]
pub async fn update_product(
    service: web::Data<AppProductService>,
    path: web::Path<i32>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let changes = validate_product(body.into_inner().into())?;
    let product = service.update(id, changes)?;

    log::info!("Updated product with ID {}", id);

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// DELETE /api/products/{id}
///
/// Permanently removes a product from the inventory.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "The unique identifier of the product to delete"),
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ProblemDetails, content_type = "application/problem+json"),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    service: web::Data<AppProductService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    service.delete(id)?;

    log::info!("Deleted product with ID {}", id);

    Ok(HttpResponse::NoContent().finish())
}
