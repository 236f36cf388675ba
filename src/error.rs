use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Upstream request failed")]
    Upstream(#[from] reqwest::Error),

    #[error("Failed to generate text")]
    TextGeneration(String),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Upstream(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            AppError::DbError(_)
            | AppError::OrmError(_)
            | AppError::TextGeneration(_)
            | AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        match &self {
            AppError::DbError(err) => tracing::error!(error = %err, "database error"),
            AppError::OrmError(err) => tracing::error!(error = %err, "orm error"),
            AppError::Upstream(err) => tracing::warn!(error = %err, "upstream error"),
            AppError::TextGeneration(err) => tracing::warn!(error = %err, "text generation error"),
            AppError::Internal(err) => tracing::error!(error = %err, "internal error"),
            _ => {}
        }

        let body = ApiResponse {
            message,
            data: Some(ErrorData {
                error: self.to_string(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
