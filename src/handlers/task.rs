use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use crate::errors::AppResult;
use crate::models::{FilterMode, FilterQuery, Progress, ReorderForm, TaskTextForm};
use crate::services::TaskListEngine;
use super::SharedWorkspace;

// Every mutation answers with the full list so the caller can re-render in one round trip.
fn list_response(engine: &TaskListEngine, message: Option<String>) -> AppResult<Response> {
    Ok(Json(json!({
        "tasks": engine.tasks()?,
        "progress": engine.progress()?,
        "message": message,
    })).into_response())
}

pub async fn list_tasks(
    State(workspace): State<SharedWorkspace>,
    Query(query): Query<FilterQuery>,
) -> AppResult<Response> {
    let mode = query.filter.as_deref().map(FilterMode::from).unwrap_or_default();
    let ws = workspace.lock().await;

    Ok(Json(json!({
        "filter": mode,
        "tasks": ws.tasks.filter(mode)?,
        "progress": ws.tasks.progress()?,
    })).into_response())
}

pub async fn add_task(
    State(workspace): State<SharedWorkspace>,
    Json(form): Json<TaskTextForm>,
) -> AppResult<Response> {
    let mut ws = workspace.lock().await;
    let message = ws.tasks.add(&form.text)?.map(|_| "Task added".to_string());
    list_response(&ws.tasks, message)
}

pub async fn edit_task(
    State(workspace): State<SharedWorkspace>,
    Path(task_id): Path<String>,
    Json(form): Json<TaskTextForm>,
) -> AppResult<Response> {
    let mut ws = workspace.lock().await;
    let changed = ws.tasks.edit(&task_id, &form.text)?;
    list_response(&ws.tasks, changed.then(|| "Task updated".to_string()))
}

pub async fn toggle_task(
    State(workspace): State<SharedWorkspace>,
    Path(task_id): Path<String>,
) -> AppResult<Response> {
    let mut ws = workspace.lock().await;
    ws.tasks.toggle_complete(&task_id)?;
    list_response(&ws.tasks, None)
}

// Confirmation is the caller's job; by the time this runs the user has agreed.
pub async fn delete_task(
    State(workspace): State<SharedWorkspace>,
    Path(task_id): Path<String>,
) -> AppResult<Response> {
    let mut ws = workspace.lock().await;
    ws.tasks.delete(&task_id)?;
    list_response(&ws.tasks, Some("Task deleted".to_string()))
}

pub async fn clear_completed(
    State(workspace): State<SharedWorkspace>,
) -> AppResult<Response> {
    let mut ws = workspace.lock().await;
    let removed = ws.tasks.clear_completed()?;

    Ok(Json(json!({
        "removed": removed,
        "tasks": ws.tasks.tasks()?,
        "progress": ws.tasks.progress()?,
        "message": format!("Cleared {} completed tasks", removed),
    })).into_response())
}

pub async fn reorder_tasks(
    State(workspace): State<SharedWorkspace>,
    Json(form): Json<ReorderForm>,
) -> AppResult<Response> {
    let mut ws = workspace.lock().await;
    let moved = ws.tasks.reorder(&form.dragged_id, &form.target_id)?;
    list_response(&ws.tasks, moved.then(|| "Tasks reordered".to_string()))
}

pub async fn get_progress(
    State(workspace): State<SharedWorkspace>,
) -> AppResult<Json<Progress>> {
    let ws = workspace.lock().await;
    Ok(Json(ws.tasks.progress()?))
}
