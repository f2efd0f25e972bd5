use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clubdata_settings::SettingsError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Main application error type that all handlers should return
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    /// Wrap errors from the settings record
    #[error("Settings error")]
    Settings(#[from] SettingsError),
}

/// Structured error response format for API consistency
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorDetail,
    request_id: String,
}

/// Error detail structure with machine-readable codes
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl AppError {
    /// Convert AppError to appropriate HTTP status code and error code
    fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            AppError::Settings(settings_error) => match settings_error {
                SettingsError::UnknownField(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_FIELD"),
                SettingsError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            },
        }
    }

    /// Get user-friendly error message (sanitized for external consumption)
    fn to_user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => format!("Validation failed: {}", msg),
            AppError::NotFound => "The requested resource was not found".to_string(),
            AppError::Unauthorized { message } => message.clone(),
            AppError::Forbidden { message } => message.clone(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            AppError::Settings(settings_error) => match settings_error {
                SettingsError::UnknownField(_) => settings_error.to_string(),
                SettingsError::Storage(_) => "Data storage error".to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();
        let user_message = self.to_user_message();

        // Log internal errors with full context but don't expose details
        match &self {
            AppError::Internal(err) => {
                error!(
                    request_id = %request_id,
                    error = %err,
                    "Internal server error occurred"
                );
            }
            AppError::Settings(SettingsError::Storage(storage_err)) => {
                error!(
                    request_id = %request_id,
                    storage_error = %storage_err,
                    "Storage system error"
                );
            }
            AppError::Unauthorized { .. } | AppError::Forbidden { .. } => {
                warn!(
                    request_id = %request_id,
                    error_code = %error_code,
                    audit = true,
                    "Admin access rejected"
                );
            }
            _ => {
                info!(
                    request_id = %request_id,
                    error_code = %error_code,
                    error = %self,
                    "API error response"
                );
            }
        }

        let error_response = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: error_code.to_string(),
                message: user_message,
            },
            request_id,
        };

        let mut response = Json(error_response).into_response();
        *response.status_mut() = status_code;
        response
    }
}
