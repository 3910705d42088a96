/// Project endpoints
///
/// - `POST /project` - Create a project
/// - `GET /project/:id` - Fetch a project together with its tasks
/// - `GET /projects` - List projects

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
use feedbox_shared::models::{CreateProject, Project};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectIdResponse {
    pub project_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub project: Project,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

/// Create a project
///
/// `description` may be omitted and defaults to an empty string.
pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<CreateProject>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<ProjectIdResponse>>)> {
    let Json(data) = payload?;

    let project_id = state.storage.save_project(data).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(ProjectIdResponse { project_id })),
    ))
}

pub async fn get_project(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Envelope<ProjectResponse>>> {
    let Path(id) = id?;

    let project = state.storage.get_project_with_tasks(id).await?;

    Ok(Json(Envelope::ok(ProjectResponse { project })))
}

pub async fn list_projects(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<ProjectsResponse>>> {
    let projects = state.storage.get_projects().await?;

    Ok(Json(Envelope::ok(ProjectsResponse { projects })))
}
