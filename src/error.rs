//! Error taxonomy shared by services, stores and handlers

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;

use crate::models::common::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input, reported immediately
    #[error("{0}")]
    Validation(String),

    #[error("Missing or invalid user identity")]
    Unauthorized,

    /// Referenced record is absent or owned by someone else
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A required input for the selected mode is missing
    #[error("{0}")]
    Precondition(String),

    /// External AI/media provider returned nothing usable or failed
    #[error("{0}")]
    Generation(String),

    #[error("Database error: {0}")]
    Persistence(#[from] DbErr),

    #[error("Database not available")]
    DatabaseUnavailable,

    #[error("Server configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Precondition(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,
            AppError::Persistence(_)
            | AppError::DatabaseUnavailable
            | AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Precondition(_) => "PRECONDITION_FAILED",
            AppError::Generation(_) => "GENERATION_FAILED",
            AppError::Persistence(_) | AppError::DatabaseUnavailable => "DATABASE_ERROR",
            AppError::Configuration(_) => "CONFIG_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
        } else {
            tracing::debug!(code = self.code(), error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: Some(self.code().to_string()),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Failure talking to an external AI/media/storage provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status; `detail` is the provider's own message when it sent one
    #[error("{provider} API error {status}: {detail}")]
    Api {
        provider: &'static str,
        status: u16,
        detail: String,
    },

    #[error("{0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Wrap into the request-level taxonomy with an operation prefix
    pub fn into_app_error(self, context: &str) -> AppError {
        match self {
            ProviderError::NotConfigured(what) => {
                AppError::Configuration(format!("{} is not configured", what))
            }
            other => AppError::Generation(format!("{}: {}", context, other)),
        }
    }
}
