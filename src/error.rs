use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::models::order::Stage;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation: {0}")]
    Validation(String),

    #[error("order {0} not found")]
    OrderNotFound(u64),

    #[error("trash is empty")]
    EmptyTrash,

    #[error("order {order_number} is at {current}, cannot move back to {requested}")]
    StageRegression {
        order_number: u64,
        current: Stage,
        requested: Stage,
    },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::OrderNotFound(_) | AppError::EmptyTrash => StatusCode::NOT_FOUND,
            AppError::StageRegression { .. } => StatusCode::CONFLICT,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
