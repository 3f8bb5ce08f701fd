//! Turning failures into HTTP responses
//!
//! Validation failures always answer 422 with `VALIDATION_ERROR`. Domain
//! failures carry the status and code their classification assigned.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use locate_core::classify::MAX_ERROR_MESSAGE_CHARS;
use locate_core::validation::truncate_chars;
use locate_core::{
    ChatError, Classification, Classify, ErrorResponse, FieldViolation, IngestError,
    RequestValidationError, ValidationErrorResponse, VALIDATION_ERROR_CODE,
};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

pub const VALIDATION_FAILED_MESSAGE: &str = "Request validation failed";

/// Everything a handler can answer with besides success
#[derive(Debug)]
pub enum ApiError {
    /// The body parsed but broke one or more field constraints
    Validation(RequestValidationError),
    /// The body could not be read as JSON of the expected shape
    MalformedBody(String),
    /// A classified agent failure
    Domain(Classification),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Domain(c) => {
                StatusCode::from_u16(c.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    fn validation_body(
        error: String,
        details: Option<Vec<FieldViolation>>,
    ) -> ValidationErrorResponse {
        ValidationErrorResponse {
            success: false,
            error,
            error_code: VALIDATION_ERROR_CODE.to_string(),
            details,
        }
    }
}

impl From<RequestValidationError> for ApiError {
    fn from(err: RequestValidationError) -> Self {
        debug!(error = %err, "Request rejected by validation");
        Self::Validation(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection, "Request body rejected");
        Self::MalformedBody(truncate_chars(&rejection.body_text(), MAX_ERROR_MESSAGE_CHARS))
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        Self::Domain(err.classify())
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        Self::Domain(err.classify())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Validation(err) => (
                status,
                Json(Self::validation_body(
                    VALIDATION_FAILED_MESSAGE.to_string(),
                    Some(err.violations),
                )),
            )
                .into_response(),
            Self::MalformedBody(message) => {
                (status, Json(Self::validation_body(message, None))).into_response()
            }
            Self::Domain(classification) => {
                (status, Json(classification.to_response())).into_response()
            }
        }
    }
}

/// Either shape a 422 can carry: a rejected request, or an agent failure
/// classified as unprocessable.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum UnprocessableBody {
    Validation(ValidationErrorResponse),
    Domain(ErrorResponse),
}
