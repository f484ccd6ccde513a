use utoipa::OpenApi;

use crate::handlers::{error_demos, products};
use crate::problem::{ProblemDetails, ValidationProblemDetails};

pub const OPENAPI_JSON_PATH: &str = "/openapi/v1.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product API",
        version = "v1",
        description = "A RESTful API for managing products with full CRUD operations"
    ),
    paths(
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        error_demos::validation_error,
        error_demos::bad_request,
        error_demos::unauthorized,
        error_demos::forbidden,
        error_demos::not_found,
        error_demos::conflict,
        error_demos::unprocessable,
        error_demos::rate_limit,
        error_demos::server_error,
        error_demos::service_unavailable,
    ),
    components(schemas(
        products::ProductRequest,
        products::ProductResponse,
        error_demos::ValidationRequest,
        error_demos::ConflictRequest,
        error_demos::UnprocessableRequest,
        ProblemDetails,
        ValidationProblemDetails,
    )),
    tags(
        (name = "Products", description = "Product CRUD endpoints"),
        (name = "Error Examples", description = "Canned problem-details responses for each error status"),
    )
)]
pub struct ApiDoc;
