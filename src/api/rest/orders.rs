use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use serde::Deserialize;

use crate::engine::lifecycle::{self, CreateOrder, StageUpdate};
use crate::error::AppError;
use crate::models::order::Order;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/:number", get(get_order))
        .route("/orders/:number/packaging", patch(update_packaging))
        .route("/orders/:number/billing", patch(update_billing))
        .route("/orders/:number/dispatch", patch(update_dispatch))
}

#[derive(Deserialize)]
pub struct PackagingRequest {
    pub total_shipper: String,
    pub packed: String,
}

#[derive(Deserialize)]
pub struct BillingRequest {
    pub billed: String,
}

#[derive(Deserialize)]
pub struct DispatchRequest {
    pub dispatched: String,
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateOrder>,
) -> Result<Json<Order>, AppError> {
    let order = lifecycle::create_order(&state, payload).await?;
    Ok(Json(order))
}

async fn list_orders(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.repo.list_active().await?))
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(number): Path<u64>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .repo
        .find_by_number(number)
        .await?
        .ok_or(AppError::OrderNotFound(number))?;

    Ok(Json(order))
}

async fn update_packaging(
    State(state): State<Arc<AppState>>,
    Path(number): Path<u64>,
    Json(payload): Json<PackagingRequest>,
) -> Result<Json<Order>, AppError> {
    let update = StageUpdate::Packaging {
        total_shipper: payload.total_shipper,
        packed: payload.packed,
    };
    let order = lifecycle::advance_order(&state, number, update).await?;
    Ok(Json(order))
}

async fn update_billing(
    State(state): State<Arc<AppState>>,
    Path(number): Path<u64>,
    Json(payload): Json<BillingRequest>,
) -> Result<Json<Order>, AppError> {
    let update = StageUpdate::Billing {
        billed: payload.billed,
    };
    let order = lifecycle::advance_order(&state, number, update).await?;
    Ok(Json(order))
}

async fn update_dispatch(
    State(state): State<Arc<AppState>>,
    Path(number): Path<u64>,
    Json(payload): Json<DispatchRequest>,
) -> Result<Json<Order>, AppError> {
    let update = StageUpdate::Dispatch {
        dispatched: payload.dispatched,
    };
    let order = lifecycle::advance_order(&state, number, update).await?;
    Ok(Json(order))
}
