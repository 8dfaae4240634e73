use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::catalog::CatalogError;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Travel data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for a validation failure on a named input field
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, field) = match &self {
            AppError::Validation { field, message } => {
                tracing::debug!(field = %field, message = %message, "Rejected invalid input");
                (StatusCode::BAD_REQUEST, self.to_string(), Some(*field))
            }
            AppError::DataUnavailable(_) | AppError::Database(_) => {
                tracing::error!(error = %self, "Travel data store read failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Travel data is currently unavailable".to_string(),
                    None,
                )
            }
            AppError::Catalog(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string(), None)
            }
        };

        let body = match field {
            Some(field) => Json(json!({ "error": message, "field": field })),
            None => Json(json!({ "error": message })),
        };

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
