//! HTTP endpoint layer.
//!
//! Maps verbs and paths onto [`TodoService`] calls and renders results as
//! JSON. Validation failures become `400`, unknown ids `404` and store
//! failures `500`, always with an `{ "error": "..." }` body.
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | GET | `/api/todos?search=&category=&priority=&sortBy=&sortOrder=` | 200 list |
//! | POST | `/api/todos` | 201 created record |
//! | PUT | `/api/todos/{id}` | 200 updated record |
//! | DELETE | `/api/todos/{id}` | 200 confirmation |
//! | GET | `/api/health` | 200 liveness |

pub mod error;
pub mod todos;

use crate::libs::messages::Message;
use crate::libs::service::TodoService;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: TodoService,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

pub fn create_router(service: TodoService) -> Router {
    create_router_with_cors(service, false)
}

pub fn create_router_with_cors(service: TodoService, cors_allow_any: bool) -> Router {
    let router = Router::new()
        .route("/api/health", get(health))
        .route("/api/todos", get(todos::list_todos).post(todos::create_todo))
        .route("/api/todos/{id}", axum::routing::put(todos::update_todo).delete(todos::delete_todo))
        .with_state(AppState { service })
        .layer(TraceLayer::new_for_http());

    if cors_allow_any {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: Message::HealthOk.to_string(),
    })
}
