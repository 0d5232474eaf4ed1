use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::Serialize;

use crate::engine::lifecycle;
use crate::error::AppError;
use crate::models::order::Order;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trash", get(list_trash))
        .route("/trash/clear", post(clear_orders))
        .route("/trash/restore", post(restore_orders))
}

#[derive(Serialize)]
pub struct ClearResponse {
    pub cleared: usize,
}

#[derive(Serialize)]
pub struct RestoreResponse {
    pub restored: usize,
}

async fn list_trash(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.repo.list_trash().await?))
}

async fn clear_orders(State(state): State<Arc<AppState>>) -> Result<Json<ClearResponse>, AppError> {
    let cleared = lifecycle::clear_orders(&state).await?;
    Ok(Json(ClearResponse { cleared }))
}

async fn restore_orders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RestoreResponse>, AppError> {
    let restored = lifecycle::restore_orders(&state).await?;
    Ok(Json(RestoreResponse {
        restored: restored.len(),
    }))
}
