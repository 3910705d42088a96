/// Developer endpoints
///
/// # Endpoints
///
/// - `POST /developer` - Register a developer
/// - `GET /developer/:id` - Fetch an active developer
/// - `DELETE /developer/:id` - Soft-delete a developer
/// - `GET /developers` - List active developers

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
use feedbox_shared::models::{CreateDeveloper, Developer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload carrying a developer ID
#[derive(Debug, Serialize, Deserialize)]
pub struct DeveloperIdResponse {
    pub developer_id: Uuid,
}

/// Payload carrying one developer
#[derive(Debug, Serialize, Deserialize)]
pub struct DeveloperResponse {
    pub developer: Developer,
}

/// Payload carrying all active developers
#[derive(Debug, Serialize, Deserialize)]
pub struct DevelopersResponse {
    pub developers: Vec<Developer>,
}

/// Register a developer
///
/// # Request
///
/// ```json
/// { "firstname": "Ada", "last_name": "Lovelace" }
/// ```
///
/// # Response (201)
///
/// ```json
/// { "status": "ok", "developer_id": "..." }
/// ```
pub async fn create_developer(
    State(state): State<AppState>,
    payload: Result<Json<CreateDeveloper>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<DeveloperIdResponse>>)> {
    let Json(data) = payload?;

    let developer_id = state.storage.save_developer(data).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(DeveloperIdResponse { developer_id })),
    ))
}

/// Fetch an active developer
pub async fn get_developer(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Envelope<DeveloperResponse>>> {
    let Path(id) = id?;

    let developer = state.storage.get_developer_by_id(id).await?;

    Ok(Json(Envelope::ok(DeveloperResponse { developer })))
}

/// List active developers
pub async fn list_developers(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<DevelopersResponse>>> {
    let developers = state.storage.get_developers().await?;

    Ok(Json(Envelope::ok(DevelopersResponse { developers })))
}

/// Soft-delete a developer
///
/// Answers 404 when the developer is unknown or already deleted.
pub async fn delete_developer(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Envelope<DeveloperIdResponse>>> {
    let Path(developer_id) = id?;

    state.storage.delete_developer(developer_id).await?;

    Ok(Json(Envelope::ok(DeveloperIdResponse { developer_id })))
}
