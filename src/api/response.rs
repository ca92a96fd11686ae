//! Response definitions
//!
//! Success bodies share one envelope, `{"record": ...}` or
//! `{"message": ...}`. Failures are `{"error": ...}` where the payload is a
//! message or, for validation failures, a field -> message map.

use std::any::Any;

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::KvError;
use crate::record::Record;
use crate::validator::ValidationErrors;

/// Success envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Envelope {
    Record(Record),
    Message(String),
}

impl Envelope {
    pub fn message(message: impl Into<String>) -> Self {
        Envelope::Message(message.into())
    }
}

#[derive(Serialize)]
struct ErrorBody<T: Serialize> {
    error: T,
}

/// Everything a handler can answer with instead of an envelope
#[derive(Debug)]
pub enum ApiError {
    /// 400: the body could not be decoded
    BadRequest(String),

    /// 400: the body decoded but broke field rules
    FailedValidation(ValidationErrors),

    /// 404: unknown route or absent record
    NotFound,

    /// 405: known path, unsupported method
    MethodNotAllowed(Method),

    /// 500: details are logged, never returned
    ServerError,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::FailedValidation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<KvError> for ApiError {
    fn from(err: KvError) -> Self {
        match err {
            KvError::Validation(errors) => ApiError::FailedValidation(errors),
            KvError::Decode(message) => ApiError::BadRequest(message),
            KvError::RecordNotFound => ApiError::NotFound,
            other => {
                tracing::error!(error = %other, "request failed");
                ApiError::ServerError
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::FailedValidation(errors) => {
                (status, Json(ErrorBody { error: errors })).into_response()
            }
            ApiError::BadRequest(message) => {
                (status, Json(ErrorBody { error: message })).into_response()
            }
            ApiError::NotFound => (
                status,
                Json(ErrorBody {
                    error: "the requested resource could not be found",
                }),
            )
                .into_response(),
            ApiError::MethodNotAllowed(method) => (
                status,
                Json(ErrorBody {
                    error: format!("the {method} method is not supported for this resource"),
                }),
            )
                .into_response(),
            ApiError::ServerError => (
                status,
                Json(ErrorBody {
                    error: "the server encountered a problem and could not process your request",
                }),
            )
                .into_response(),
        }
    }
}

/// Turn a caught handler panic into a 500
///
/// The connection is closed after the response.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };
    tracing::error!(panic = detail, "handler panicked");

    let mut response = ApiError::ServerError.into_response();
    response
        .headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));
    response
}
