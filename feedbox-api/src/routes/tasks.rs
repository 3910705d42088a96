/// Task endpoints
///
/// - `POST /task` - Record a task against a report and a project
/// - `GET /task/:id` - Fetch a task with its report and project
/// - `GET /task/:id/calendar` - Check that a task exists
/// - `GET /tasks` - List tasks

use super::Envelope;
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use feedbox_shared::models::{CreateTask, Task};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskIdResponse {
    pub task_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task: Task,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

/// Record a task
///
/// # Request
///
/// ```json
/// {
///   "report_id": "...",
///   "project_id": "...",
///   "name": "Review pull requests",
///   "developer_note": "two rounds",
///   "estimate_planed": 60,
///   "estimate_progress": 45,
///   "start_timestamp": "2025-01-06T09:00:00Z",
///   "end_timestamp": "2025-01-06T10:00:00Z"
/// }
/// ```
///
/// Unknown report or project IDs, a non-positive planned estimate and an
/// end before the start all answer 400.
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTask>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<TaskIdResponse>>)> {
    let Json(data) = payload?;

    let task_id = state.storage.save_task(data).await?;

    Ok((StatusCode::CREATED, Json(Envelope::ok(TaskIdResponse { task_id }))))
}

pub async fn get_task(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Envelope<TaskResponse>>> {
    let Path(id) = id?;

    let task = state.storage.get_task_with_relations(id).await?;

    Ok(Json(Envelope::ok(TaskResponse { task })))
}

pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Envelope<TasksResponse>>> {
    let tasks = state.storage.get_tasks().await?;

    Ok(Json(Envelope::ok(TasksResponse { tasks })))
}

/// Calendar probe
///
/// Only confirms the task exists; no calendar data is produced yet.
pub async fn get_calendar(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Envelope<TaskIdResponse>>> {
    let Path(task_id) = id?;

    state.storage.get_calendar(task_id).await?;

    Ok(Json(Envelope::ok(TaskIdResponse { task_id })))
}
