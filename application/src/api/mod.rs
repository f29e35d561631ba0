//! HTTP API definitions.

pub mod user;

use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;

use crate::Service;

/// Builds the [`Router`] serving the HTTP API of the provided [`Service`].
pub fn router(service: Service) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/users", get(user::list).post(user::create))
        .route(
            "/api/users/:id",
            get(user::get).put(user::update).delete(user::delete),
        )
        .route("/api/users/:id/refresh", post(user::refresh))
        .layer(Extension(service))
}

/// Liveness probe.
#[expect(
    clippy::unused_async,
    reason = "`async` is required to match signature"
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}
