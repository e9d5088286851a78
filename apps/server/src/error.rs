// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing file in request")]
    MissingFile,

    #[error("Invalid UTF-8 content")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Invalid CSV: {0}")]
    InvalidCsv(String),

    #[error("Invalid export options: {0}")]
    InvalidOptions(String),

    #[error("Invalid color for tag {tag}: {color}")]
    InvalidColor { tag: String, color: String },

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Color store error: {0}")]
    Cache(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Join error")]
    Join(#[from] tokio::task::JoinError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::MissingFile => (StatusCode::BAD_REQUEST, "MISSING_FILE"),
            ApiError::InvalidUtf8(_) => (StatusCode::BAD_REQUEST, "INVALID_UTF8"),
            ApiError::Multipart(_) => (StatusCode::BAD_REQUEST, "MULTIPART_ERROR"),
            ApiError::InvalidCsv(_) => (StatusCode::BAD_REQUEST, "INVALID_CSV"),
            ApiError::InvalidOptions(_) => (StatusCode::BAD_REQUEST, "INVALID_OPTIONS"),
            ApiError::InvalidColor { .. } => (StatusCode::BAD_REQUEST, "INVALID_COLOR"),
            ApiError::Processing(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PROCESSING_ERROR"),
            ApiError::Cache(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CACHE_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Join(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TASK_ERROR"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<geosym_core::Error> for ApiError {
    fn from(err: geosym_core::Error) -> Self {
        match err {
            geosym_core::Error::SchemaNotSet | geosym_core::Error::MissingHeaderRow => {
                ApiError::InvalidCsv(err.to_string())
            }
            geosym_core::Error::ColorStore(msg) => ApiError::Cache(msg),
            other => ApiError::Processing(other.to_string()),
        }
    }
}

impl From<geosym_processing::Error> for ApiError {
    fn from(err: geosym_processing::Error) -> Self {
        match err {
            geosym_processing::Error::Options(e) => ApiError::InvalidOptions(e.to_string()),
            other => ApiError::Processing(other.to_string()),
        }
    }
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::InvalidCsv(err.to_string())
    }
}
