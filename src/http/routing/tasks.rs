use axum::{
    extract::{Path, State},
    routing::{post, put},
    Json, Router,
};

use crate::application::task_service::TaskService;
use crate::domain::task::{CreateTask, Task, TaskId, UpdateTask};
use crate::http::types::ApiError;

#[derive(Clone)]
pub struct AppState<S: TaskService> {
    pub service: S,
}

pub fn router<S: TaskService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todo", post(create_task::<S>).get(list_tasks::<S>))
        .route("/todo/:id", put(update_task::<S>).delete(delete_task::<S>))
        .with_state(state)
}

async fn create_task<S: TaskService>(
    State(state): State<AppState<S>>,
    Json(payload): Json<CreateTask>,
) -> Result<Json<Task>, ApiError> {
    let task = state.service.create(payload).await?;
    Ok(Json(task))
}

async fn list_tasks<S: TaskService>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.service.list().await?;
    Ok(Json(tasks))
}

async fn update_task<S: TaskService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTask>,
) -> Result<Json<&'static str>, ApiError> {
    // Unknown ids are a silent no-op; the confirmation is unconditional.
    state.service.set_completed(TaskId(id), payload.completed).await?;
    Ok(Json("Updated"))
}

async fn delete_task<S: TaskService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<Json<&'static str>, ApiError> {
    state.service.delete(TaskId(id)).await?;
    Ok(Json("Deleted"))
}
