use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::error;

use crate::upload::UploadError;

/// Domain invariant violations. Pure data so the validation engine stays
/// free of any HTTP or storage concern.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Employee must be at least 18 years old.")]
    UnderAge,
    #[error("Start date must be before or equal to end date")]
    DateRange,
    #[error("Start time must be before end time")]
    TimeRange,
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("{field} must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

impl ValidationError {
    /// Key the error is reported under in the `errors` response object.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::UnderAge => "date_of_birth",
            ValidationError::DateRange => "date_range",
            ValidationError::TimeRange => "time_validation",
            ValidationError::MissingFields(_) => "required",
            ValidationError::InvalidField { field, .. } => field,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upload(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // One message listing every offender, not a per-field object.
            AppError::Validation(ValidationError::MissingFields(fields)) => {
                HttpResponse::BadRequest().json(json!({
                    "message": format!("Missing required fields: {}", fields.join(", "))
                }))
            }
            AppError::Validation(err) => {
                let mut errors = Map::new();
                errors.insert(err.field().to_string(), Value::String(err.to_string()));
                HttpResponse::BadRequest().json(json!({ "errors": errors }))
            }
            AppError::NotFound(_) => {
                HttpResponse::NotFound().json(json!({ "message": self.to_string() }))
            }
            AppError::Upload(err) => {
                error!(error = %err, "Attachment upload failed");
                HttpResponse::InternalServerError().json(json!({
                    "error": "File upload failed. Please try again."
                }))
            }
            AppError::Database(err) => {
                error!(error = %err, "Database error");
                HttpResponse::InternalServerError().json(json!({
                    "message": "Internal Server Error"
                }))
            }
        }
    }
}
