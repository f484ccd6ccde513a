//! Endpoints that each return one canned error, so clients and API tooling can
//! see every problem-details shape this service produces.

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::problem::{ProblemDetails, ValidationProblemDetails};
use crate::validation::{is_blank, ValidationErrors};

const RATE_LIMIT_RETRY_AFTER_SECS: u64 = 60;
const MAINTENANCE_RETRY_AFTER_SECS: u64 = 300;

// ── Request DTOs ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    /// Required, at least 3 characters
    pub name: Option<String>,
    /// Required, must contain '@'
    pub email: Option<String>,
    /// Between 0 and 120
    #[serde(default)]
    pub age: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConflictRequest {
    pub identifier: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnprocessableRequest {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Parses an optional JSON body; an empty body or a literal `null` is `None`.
fn optional_body<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<T>>(body).map_err(|e| {
        log::warn!("Rejected malformed JSON body: {}", e);
        AppError::BadRequest(format!("The request body is not valid JSON: {}", e))
    })
}

pub fn validate_contact(request: Option<&ValidationRequest>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let Some(request) = request else {
        errors.add("request", "Request body is required.");
        return errors;
    };

    match request.name.as_deref() {
        name if is_blank(name) => errors.add("Name", "The Name field is required."),
        Some(name) if name.chars().count() < 3 => {
            errors.add("Name", "The Name field must be at least 3 characters long.")
        }
        _ => {}
    }

    match request.email.as_deref() {
        email if is_blank(email) => errors.add("Email", "The Email field is required."),
        Some(email) if !email.contains('@') => {
            errors.add("Email", "The Email field must be a valid email address.")
        }
        _ => {}
    }

    if !(0..=120).contains(&request.age) {
        errors.add("Age", "The Age field must be between 0 and 120.");
    }

    errors
}

/// Always fails; stands in for an operation that hits an unexpected fault.
fn simulate_fault() -> Result<String, AppError> {
    Err(AppError::Internal(
        "An unexpected error occurred while processing your request. \
         This fault demonstrates how unhandled errors are turned into problem details."
            .to_string(),
    ))
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// Demonstrates a 400 Bad Request with validation errors
///
/// Pass invalid data to trigger validation errors. Every failing field is
/// reported.
#[utoipa::path(
    post,
    path = "/api/errors/validation-error",
    request_body = ValidationRequest,
    responses(
        (status = 400, description = "Validation failed", body = ValidationProblemDetails, content_type = "application/problem+json"),
    ),
    tag = "Error Examples"
)]
pub async fn validation_error(body: web::Bytes) -> Result<HttpResponse, AppError> {
    let request: Option<ValidationRequest> = optional_body(&body)?;
    Err(AppError::Validation(validate_contact(request.as_ref())))
}

/// Demonstrates a 400 Bad Request with ProblemDetails
///
/// A malformed request that isn't a validation error.
#[utoipa::path(
    post,
    path = "/api/errors/bad-request",
    responses(
        (status = 400, description = "Bad request", body = ProblemDetails, content_type = "application/problem+json"),
    ),
    tag = "Error Examples"
)]
pub async fn bad_request() -> Result<HttpResponse, AppError> {
    Err(AppError::BadRequest(
        "The request contains malformed JSON or unsupported content type. \
         This is a general bad request error, not a validation error."
            .to_string(),
    ))
}

/// Demonstrates a 401 Unauthorized error
#[utoipa::path(
    get,
    path = "/api/errors/unauthorized",
    responses(
        (status = 401, description = "Authentication required", body = ProblemDetails, content_type = "application/problem+json"),
    ),
    tag = "Error Examples"
)]
pub async fn unauthorized() -> Result<HttpResponse, AppError> {
    Err(AppError::Unauthorized)
}

/// Demonstrates a 403 Forbidden error
#[utoipa::path(
    get,
    path = "/api/errors/forbidden",
    responses(
        (status = 403, description = "Caller lacks permission", body = ProblemDetails, content_type = "application/problem+json"),
    ),
    tag = "Error Examples"
)]
pub async fn forbidden() -> Result<HttpResponse, AppError> {
    Err(AppError::Forbidden(
        "You do not have permission to access this resource. \
         This operation requires administrator privileges."
            .to_string(),
    ))
}

/// Demonstrates a 404 Not Found error
#[utoipa::path(
    get,
    path = "/api/errors/not-found/{id}",
    params(
        ("id" = i32, Path, description = "Any ID value will trigger a 404 response"),
    ),
    responses(
        (status = 404, description = "Resource not found", body = ProblemDetails, content_type = "application/problem+json"),
    ),
    tag = "Error Examples"
)]
pub async fn not_found(path: web::Path<i32>) -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound {
        title: "Resource not found".to_string(),
        detail: format!(
            "The requested resource with ID {} was not found in the system.",
            path.into_inner()
        ),
    })
}

/// Demonstrates a 409 Conflict error
///
/// Such as attempting to create a duplicate resource.
#[utoipa::path(
    post,
    path = "/api/errors/conflict",
    request_body = ConflictRequest,
    responses(
        (status = 409, description = "Conflict with current state", body = ProblemDetails, content_type = "application/problem+json"),
    ),
    tag = "Error Examples"
)]
pub async fn conflict(body: web::Bytes) -> Result<HttpResponse, AppError> {
    let request: Option<ConflictRequest> = optional_body(&body)?;
    let identifier = request
        .and_then(|r| r.identifier)
        .unwrap_or_else(|| "unknown".to_string());

    Err(AppError::Conflict(format!(
        "A resource with identifier '{}' already exists. \
         Please use a different identifier or update the existing resource.",
        identifier
    )))
}

/// Demonstrates a 422 Unprocessable Entity error
///
/// The request is well-formed but semantically incorrect.
#[utoipa::path(
    post,
    path = "/api/errors/unprocessable",
    request_body = UnprocessableRequest,
    responses(
        (status = 422, description = "Semantically invalid request", body = ProblemDetails, content_type = "application/problem+json"),
    ),
    tag = "Error Examples"
)]
pub async fn unprocessable(body: web::Bytes) -> Result<HttpResponse, AppError> {
    let request: Option<UnprocessableRequest> = optional_body(&body)?;
    if let Some(r) = request {
        log::debug!("Unprocessable demo called with {:?} .. {:?}", r.start_date, r.end_date);
    }

    Err(AppError::Unprocessable(
        "The request was well-formed but contains semantic errors. \
         For example, the start date cannot be after the end date."
            .to_string(),
    ))
}

/// Demonstrates a 429 Too Many Requests error
///
/// No limiting happens; the response is always the same.
#[utoipa::path(
    get,
    path = "/api/errors/rate-limit",
    responses(
        (status = 429, description = "Rate limit exceeded", body = ProblemDetails, content_type = "application/problem+json"),
    ),
    tag = "Error Examples"
)]
pub async fn rate_limit() -> Result<HttpResponse, AppError> {
    Err(AppError::TooManyRequests {
        detail: "Rate limit exceeded. You have made too many requests in a short period. \
                 Please wait before making additional requests."
            .to_string(),
        retry_after_secs: RATE_LIMIT_RETRY_AFTER_SECS,
    })
}

/// Demonstrates a 500 Internal Server Error
///
/// The handler hits an internal fault which is converted to a generic
/// problem-details response; the cause is logged, not returned.
#[utoipa::path(
    get,
    path = "/api/errors/server-error",
    responses(
        (status = 200, description = "Never returned", body = String),
        (status = 500, description = "Internal server error", body = ProblemDetails, content_type = "application/problem+json"),
    ),
    tag = "Error Examples"
)]
pub async fn server_error() -> Result<HttpResponse, AppError> {
    let message = simulate_fault()?;
    Ok(HttpResponse::Ok().json(message))
}

/// Demonstrates a 503 Service Unavailable error
#[utoipa::path(
    get,
    path = "/api/errors/service-unavailable",
    responses(
        (status = 503, description = "Service temporarily unavailable", body = ProblemDetails, content_type = "application/problem+json"),
    ),
    tag = "Error Examples"
)]
pub async fn service_unavailable() -> Result<HttpResponse, AppError> {
    Err(AppError::ServiceUnavailable {
        detail: "The service is temporarily unavailable due to maintenance or high load. \
                 Please try again later."
            .to_string(),
        retry_after_secs: MAINTENANCE_RETRY_AFTER_SECS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: Option<&str>, email: Option<&str>, age: i32) -> ValidationRequest {
        ValidationRequest {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            age,
        }
    }

    #[test]
    fn missing_body_is_a_single_request_error() {
        let errors = validate_contact(None);

        assert_eq!(errors.fields().len(), 1);
        assert_eq!(errors.fields()["request"], vec!["Request body is required."]);
    }

    #[test]
    fn short_name_bad_email_and_old_age_all_reported() {
        let errors = validate_contact(Some(&contact(Some("Al"), Some("bad"), 200)));

        let keys: Vec<&str> = errors.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Age", "Email", "Name"]);
        assert_eq!(
            errors.fields()["Name"],
            vec!["The Name field must be at least 3 characters long."]
        );
        assert_eq!(
            errors.fields()["Email"],
            vec!["The Email field must be a valid email address."]
        );
    }

    #[test]
    fn blank_fields_are_required() {
        let errors = validate_contact(Some(&contact(Some(" "), None, 30)));

        assert_eq!(errors.fields()["Name"], vec!["The Name field is required."]);
        assert_eq!(errors.fields()["Email"], vec!["The Email field is required."]);
        assert!(!errors.fields().contains_key("Age"));
    }

    #[test]
    fn valid_contact_still_yields_empty_errors() {
        let errors = validate_contact(Some(&contact(Some("Alice"), Some("a@b.c"), 0)));
        assert!(errors.is_empty());
    }

    #[test]
    fn optional_body_treats_empty_and_null_as_absent() {
        assert!(optional_body::<ConflictRequest>(b"").expect("empty").is_none());
        assert!(optional_body::<ConflictRequest>(b"  null ").expect("null").is_none());
        assert!(matches!(
            optional_body::<ConflictRequest>(b"{not json"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[actix_web::test]
    async fn conflict_falls_back_to_unknown_identifier() {
        let err = conflict(web::Bytes::from_static(b"{}"))
            .await
            .expect_err("always conflicts");

        match err {
            AppError::Conflict(detail) => assert!(detail.contains("'unknown'")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn server_error_goes_through_the_error_channel() {
        let err = server_error().await.expect_err("always fails");
        assert!(matches!(err, AppError::Internal(_)));
    }
}
