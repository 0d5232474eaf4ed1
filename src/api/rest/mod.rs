pub mod orders;
pub mod trash;
pub mod ws;

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;

use crate::error::AppError;
use crate::state::AppState;

pub fn router(state: Arc<AppState>, frontend_origin: &str) -> Router {
    Router::new()
        .merge(orders::router())
        .merge(trash::router())
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
        .layer(cors_layer(frontend_origin))
        .fallback_service(ServeDir::new("static"))
}

fn cors_layer(frontend_origin: &str) -> CorsLayer {
    let origin = match frontend_origin.parse::<HeaderValue>() {
        Ok(value) => AllowOrigin::exact(value),
        Err(err) => {
            tracing::warn!(error = %err, frontend_origin, "invalid frontend origin, allowing any");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([CONTENT_TYPE])
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    active_orders: usize,
    trashed_orders: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, AppError> {
    Ok(Json(HealthResponse {
        status: "ok",
        active_orders: state.repo.list_active().await?.len(),
        trashed_orders: state.repo.list_trash().await?.len(),
    }))
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}
