use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use exome::ExomeError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Exome(#[from] ExomeError),

    #[error("store query was cancelled")]
    Blocking(#[from] BlockingError),

    #[error("failed to serialize response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Exome(ExomeError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Exome(ExomeError::Validation(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(ErrorBody { error: message })
    }
}
