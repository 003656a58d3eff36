//! `/api/todos` handlers.
//!
//! Each handler runs its store call on the blocking pool; SQLite work never
//! executes on the async worker threads.

use super::error::ApiError;
use super::AppState;
use crate::libs::error::TodoResult;
use crate::libs::messages::Message;
use crate::libs::service::TodoService;
use crate::libs::todo::{NewTodo, TodoChanges, TodoQuery, TodoView};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Query string of `GET /api/todos`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
}

impl From<ListParams> for TodoQuery {
    fn from(params: ListParams) -> Self {
        TodoQuery::from_params(
            params.search,
            params.category,
            params.priority,
            params.sort_by.as_deref(),
            params.sort_order.as_deref(),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
}

async fn with_service<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&TodoService) -> TodoResult<T> + Send + 'static,
{
    let service = state.service.clone();
    let result = tokio::task::spawn_blocking(move || op(&service)).await?;
    Ok(result?)
}

/// GET /api/todos
pub async fn list_todos(State(state): State<AppState>, Query(params): Query<ListParams>) -> Result<Json<Vec<TodoView>>, ApiError> {
    let query = TodoQuery::from(params);
    let todos = with_service(&state, move |service| service.list(&query)).await?;
    Ok(Json(todos))
}

/// POST /api/todos
pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<NewTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoView>), ApiError> {
    let Json(input) = body?;
    let todo = with_service(&state, move |service| service.create(input)).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /api/todos/{id}
pub async fn update_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<TodoChanges>, JsonRejection>,
) -> Result<Json<TodoView>, ApiError> {
    let Path(id) = id?;
    let Json(changes) = body?;
    let todo = with_service(&state, move |service| service.update(id, changes)).await?;
    Ok(Json(todo))
}

/// DELETE /api/todos/{id}
pub async fn delete_todo(State(state): State<AppState>, id: Result<Path<i64>, PathRejection>) -> Result<Json<DeletedResponse>, ApiError> {
    let Path(id) = id?;
    with_service(&state, move |service| service.delete(id)).await?;
    Ok(Json(DeletedResponse {
        message: Message::TodoDeleted.to_string(),
    }))
}
