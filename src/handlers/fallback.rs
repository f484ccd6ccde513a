//! Boundary handlers that turn framework-level rejections into problem details.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{web, HttpRequest, HttpResponse, Route};

use crate::errors::AppError;

/// Any route that is not registered.
pub async fn route_not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound {
        title: "Not Found".to_string(),
        detail: format!("No resource matches '{} {}'.", req.method(), req.path()),
    })
}

/// Default service for a resource: any method without a route is a 405
/// listing `allow`.
pub fn method_not_allowed(allow: &'static str) -> Route {
    web::to(move |req: HttpRequest| async move {
        log::warn!("Rejected {} {}: allowed {}", req.method(), req.path(), allow);
        Err::<HttpResponse, AppError>(AppError::MethodNotAllowed {
            method: req.method().to_string(),
            allow,
        })
    })
}

pub fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected request body on {}: {}", req.path(), err);
    AppError::BadRequest(format!("The request body could not be read: {}", err)).into()
}

/// Path segments that fail to parse behave like an unmatched route.
pub fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected path {}: {}", req.path(), err);
    AppError::NotFound {
        title: "Not Found".to_string(),
        detail: format!("No resource matches '{} {}'.", req.method(), req.path()),
    }
    .into()
}
