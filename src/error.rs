use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use heck::ToLowerCamelCase;
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Errors a handler can answer with.
///
/// Client errors carry a JSON body. `Internal` deliberately has none; the
/// cause is logged where it is produced.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request validation failed")]
    Validation(#[from] ValidationErrors),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("internal server error")]
    Internal,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

const VALIDATION_TITLE: &str = "Request validation failed.";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    kind: "ValidationError",
                    title: VALIDATION_TITLE,
                    status: StatusCode::BAD_REQUEST.as_u16(),
                    detail: None,
                    errors: field_errors(&errors),
                },
            ),
            ApiError::MalformedBody(detail) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    kind: "ValidationError",
                    title: VALIDATION_TITLE,
                    status: StatusCode::BAD_REQUEST.as_u16(),
                    detail: Some(detail),
                    errors: Vec::new(),
                },
            ),
            ApiError::Conflict(title) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    kind: "Conflict",
                    title,
                    status: StatusCode::CONFLICT.as_u16(),
                    detail: None,
                    errors: Vec::new(),
                },
            ),
            ApiError::Internal => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        };
        (status, Json(body)).into_response()
    }
}

/// Flattens validator output into a stable, field-sorted list using the
/// request's JSON field names.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_lower_camel_case();
            errs.iter().map(move |e| FieldError {
                field: field.clone(),
                code: e.code.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} failed the {} rule", field, e.code)),
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    out
}
