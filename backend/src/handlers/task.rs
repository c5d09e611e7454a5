//! HTTP handlers for task scheduling

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use shared::{CreateTaskInput, RecordId, Task, TaskFilter, TaskSort, TaskView, UpdateTaskInput};

use super::ListQuery;
use crate::error::AppResult;
use crate::services::{today, TaskService};
use crate::AppState;

/// Task list with stats, e.g. `?filter=overdue&sort=priority`
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<TaskView>> {
    let (filter, sort) = query.selectors::<TaskFilter, TaskSort>()?;
    let service = TaskService::new(state.store);
    let view = service.get_task_view(filter, sort, today()).await?;
    Ok(Json(view))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<RecordId>,
) -> AppResult<Json<Task>> {
    let service = TaskService::new(state.store);
    let task = service.get_task(task_id).await?;
    Ok(Json(task))
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<CreateTaskInput>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let service = TaskService::new(state.store);
    let task = service.create_task(input, today()).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<RecordId>,
    Json(input): Json<UpdateTaskInput>,
) -> AppResult<Json<Task>> {
    let service = TaskService::new(state.store);
    let task = service.update_task(task_id, input).await?;
    Ok(Json(task))
}

/// Mark a task done, or undone
pub async fn toggle_task(
    State(state): State<AppState>,
    Path(task_id): Path<RecordId>,
) -> AppResult<Json<Task>> {
    let service = TaskService::new(state.store);
    let task = service.toggle_completed(task_id).await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<RecordId>,
) -> AppResult<StatusCode> {
    let service = TaskService::new(state.store);
    service.delete_task(task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
