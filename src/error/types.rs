use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{DownloadFailureDetails, ErrorResponse};

pub type AppResult<T> = Result<T, AppError>;

pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{name} parameter is required")]
    MissingParameter { name: String },

    #[error("Supabase configuration missing. Please set SUPABASE_URL and SUPABASE_ANON_KEY in .env")]
    ConfigurationMissing,

    #[error("Failed to download PDF: {message}")]
    DownloadFailed {
        message: String,
        details: DownloadFailureDetails,
    },

    #[error("{}", or_unknown(.message))]
    Unexpected { message: String },
}

fn or_unknown(message: &str) -> &str {
    if message.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE
    } else {
        message
    }
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingParameter { .. } => "MISSING_PARAMETER",
            AppError::ConfigurationMissing => "CONFIGURATION_MISSING",
            AppError::DownloadFailed { .. } => "DOWNLOAD_FAILED",
            AppError::Unexpected { .. } => "UNEXPECTED_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameter { .. } => StatusCode::BAD_REQUEST,
            AppError::ConfigurationMissing => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DownloadFailed { .. } => StatusCode::NOT_FOUND,
            AppError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body returned to the caller.
    pub fn to_body(&self) -> ErrorResponse {
        let details = match self {
            AppError::DownloadFailed { details, .. } => Some(details.clone()),
            _ => None,
        };
        ErrorResponse {
            error: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let body = self.to_body();
        let request_id = Uuid::new_v4().to_string();

        tracing::error!(
            error_code = error_code,
            status_code = %status,
            request_id = %request_id,
            error_message = %body.error,
            "API error occurred"
        );

        (status, Json(body)).into_response()
    }
}

// Helper methods for creating specific errors
impl AppError {
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        AppError::MissingParameter { name: name.into() }
    }

    pub fn download_failed(message: impl Into<String>, details: DownloadFailureDetails) -> Self {
        AppError::DownloadFailed {
            message: message.into(),
            details,
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        AppError::Unexpected {
            message: message.into(),
        }
    }
}
