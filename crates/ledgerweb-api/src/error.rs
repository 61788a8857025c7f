//! Error types for ledgerweb-api
//!
//! Every variant renders as `{"error": "<message>"}`. Messages are fixed so
//! that no storage detail reaches the client; causes are logged server-side.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Error reading transactions")]
    ReadFailed,

    #[error("Error adding transaction")]
    AddFailed,

    #[error("Error deleting transaction")]
    DeleteFailed,

    #[error("Error exporting transactions")]
    ExportFailed,

    #[error("Bad request: {message}")]
    BadRequest { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
