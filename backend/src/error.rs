//! Error handling for the NutriScan server
//!
//! Every error leaves the server as `{"error": {"code", "message", "field"?}}`

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::BarcodeError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // Lookup errors
    #[error("Product not found")]
    ProductNotFound,

    #[error("Route not found")]
    RouteNotFound,

    // External service errors
    #[error("Failed to fetch product data: {message}")]
    ProductLookup { status: u16, message: String },

    #[error("Product lookup service unavailable: {0}")]
    LookupUnavailable(String),

    #[error("AI summary service error: {0}")]
    AiSummary(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::ProductNotFound | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::ProductLookup { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|code| code.is_client_error() || code.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            AppError::LookupUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::AiSummary(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::InvalidBody(_) => "INVALID_BODY",
            AppError::ProductNotFound => "PRODUCT_NOT_FOUND",
            AppError::RouteNotFound => "ROUTE_NOT_FOUND",
            AppError::ProductLookup { .. } => "PRODUCT_LOOKUP_ERROR",
            AppError::LookupUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::AiSummary(_) => "AI_SUMMARY_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_detail = match &self {
            AppError::Validation { field, message } => ErrorDetail {
                code: self.code().to_string(),
                message: message.clone(),
                field: Some(field.clone()),
            },
            // Upstream details stay in the logs
            AppError::LookupUnavailable(_) => ErrorDetail {
                code: self.code().to_string(),
                message: "Product lookup is temporarily unavailable. Please try again later."
                    .to_string(),
                field: None,
            },
            AppError::Configuration(_) => ErrorDetail {
                code: self.code().to_string(),
                message: "Internal server error. Please try again later.".to_string(),
                field: None,
            },
            _ => ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
                field: None,
            },
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

impl From<BarcodeError> for AppError {
    fn from(err: BarcodeError) -> Self {
        AppError::Validation {
            field: "barcode".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
