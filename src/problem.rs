//! RFC 9457 problem-details bodies.

use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const PROBLEM_JSON: &str = "application/problem+json";

pub const TYPE_BAD_REQUEST: &str = "https://tools.ietf.org/html/rfc9110#section-15.5.1";
pub const TYPE_UNAUTHORIZED: &str = "https://tools.ietf.org/html/rfc9110#section-15.5.2";
pub const TYPE_FORBIDDEN: &str = "https://tools.ietf.org/html/rfc9110#section-15.5.4";
pub const TYPE_NOT_FOUND: &str = "https://tools.ietf.org/html/rfc9110#section-15.5.5";
pub const TYPE_METHOD_NOT_ALLOWED: &str = "https://tools.ietf.org/html/rfc9110#section-15.5.6";
pub const TYPE_CONFLICT: &str = "https://tools.ietf.org/html/rfc9110#section-15.5.10";
pub const TYPE_UNPROCESSABLE: &str = "https://tools.ietf.org/html/rfc4918#section-11.2";
pub const TYPE_TOO_MANY_REQUESTS: &str = "https://tools.ietf.org/html/rfc6585#section-4";
pub const TYPE_INTERNAL: &str = "https://tools.ietf.org/html/rfc9110#section-15.6.1";
pub const TYPE_SERVICE_UNAVAILABLE: &str = "https://tools.ietf.org/html/rfc9110#section-15.6.4";

pub const VALIDATION_TITLE: &str = "One or more validation errors occurred.";

/// Standard error body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProblemDetails {
    /// URI identifying the error category
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short summary of the problem
    pub title: String,
    /// HTTP status code
    pub status: u16,
    /// Human-readable explanation specific to this occurrence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ProblemDetails {
    pub fn new(status: StatusCode, problem_type: &str, title: &str) -> Self {
        Self {
            problem_type: problem_type.to_string(),
            title: title.to_string(),
            status: status.as_u16(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Problem details carrying every failed field and its messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidationProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Field name → ordered list of messages
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationProblemDetails {
    pub fn new(errors: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            problem_type: TYPE_BAD_REQUEST.to_string(),
            title: VALIDATION_TITLE.to_string(),
            status: StatusCode::BAD_REQUEST.as_u16(),
            detail: None,
            errors,
        }
    }
}
