use actix_web::http::header;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;
use crate::problem::{self, ProblemDetails, ValidationProblemDetails};
use crate::validation::ValidationErrors;

const INTERNAL_TITLE: &str = "An error occurred while processing your request.";
const INTERNAL_DETAIL: &str = "An unexpected error occurred. Please try again later.";

/// Every non-success outcome a handler can produce. Each variant maps to
/// exactly one status code and problem-details body in `error_response`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{title}: {detail}")]
    NotFound { title: String, detail: String },

    #[error("Method {method} not allowed; allowed: {allow}")]
    MethodNotAllowed { method: String, allow: &'static str },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable entity: {0}")]
    Unprocessable(String),

    #[error("Too many requests: {detail}")]
    TooManyRequests { detail: String, retry_after_secs: u64 },

    #[error("Service unavailable: {detail}")]
    ServiceUnavailable { detail: String, retry_after_secs: u64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn product_not_found(id: i32) -> Self {
        AppError::NotFound {
            title: "Product not found".to_string(),
            detail: format!("Product with ID {} was not found", id),
        }
    }

    /// Body for every variant except `Validation`, which carries field errors.
    pub fn problem(&self) -> ProblemDetails {
        let status = actix_web::ResponseError::status_code(self);
        match self {
            AppError::Validation(_) => {
                ProblemDetails::new(status, problem::TYPE_BAD_REQUEST, problem::VALIDATION_TITLE)
            }
            AppError::BadRequest(detail) => {
                ProblemDetails::new(status, problem::TYPE_BAD_REQUEST, "Bad Request")
                    .with_detail(detail.as_str())
            }
            AppError::Unauthorized => {
                ProblemDetails::new(status, problem::TYPE_UNAUTHORIZED, "Unauthorized")
            }
            AppError::Forbidden(detail) => {
                ProblemDetails::new(status, problem::TYPE_FORBIDDEN, "Forbidden")
                    .with_detail(detail.as_str())
            }
            AppError::NotFound { title, detail } => {
                ProblemDetails::new(status, problem::TYPE_NOT_FOUND, title)
                    .with_detail(detail.as_str())
            }
            AppError::MethodNotAllowed { method, .. } => ProblemDetails::new(
                status,
                problem::TYPE_METHOD_NOT_ALLOWED,
                "Method Not Allowed",
            )
            .with_detail(format!(
                "The method '{}' is not supported by this resource.",
                method
            )),
            AppError::Conflict(detail) => {
                ProblemDetails::new(status, problem::TYPE_CONFLICT, "Conflict")
                    .with_detail(detail.as_str())
            }
            AppError::Unprocessable(detail) => {
                ProblemDetails::new(status, problem::TYPE_UNPROCESSABLE, "Unprocessable Entity")
                    .with_detail(detail.as_str())
            }
            AppError::TooManyRequests { detail, .. } => {
                ProblemDetails::new(status, problem::TYPE_TOO_MANY_REQUESTS, "Too Many Requests")
                    .with_detail(detail.as_str())
            }
            AppError::ServiceUnavailable { detail, .. } => ProblemDetails::new(
                status,
                problem::TYPE_SERVICE_UNAVAILABLE,
                "Service Unavailable",
            )
            .with_detail(detail.as_str()),
            AppError::Internal(_) => {
                ProblemDetails::new(status, problem::TYPE_INTERNAL, INTERNAL_TITLE)
                    .with_detail(INTERNAL_DETAIL)
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(id) => AppError::product_not_found(id),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        AppError::Validation(e)
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        builder.insert_header((header::CONTENT_TYPE, problem::PROBLEM_JSON));

        match self {
            AppError::Validation(errors) => {
                return builder.json(ValidationProblemDetails::new(errors.fields().clone()));
            }
            AppError::Unauthorized => {
                builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
            }
            AppError::MethodNotAllowed { allow, .. } => {
                builder.insert_header((header::ALLOW, *allow));
            }
            AppError::TooManyRequests {
                retry_after_secs, ..
            }
            | AppError::ServiceUnavailable {
                retry_after_secs, ..
            } => {
                builder.insert_header((header::RETRY_AFTER, retry_after_secs.to_string()));
            }
            AppError::Internal(msg) => {
                log::error!("Unhandled error: {}", msg);
            }
            _ => {}
        }

        builder.json(self.problem())
    }
}
