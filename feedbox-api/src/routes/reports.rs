/// Work report endpoints
///
/// - `POST /report` - Open a report for an active developer
/// - `GET /report/:id` - Fetch a report with its developer and tasks
/// - `GET /reports` - List reports, optionally for one developer
///
/// # Filtering
///
/// `GET /reports?developer_id=<uuid>` narrows the listing to a single
/// developer, including developers that have since been deleted.

use super::Envelope;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use feedbox_shared::models::{CreateReport, Report};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportIdResponse {
    pub report_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    pub report: Report,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportsResponse {
    pub reports: Vec<Report>,
}

/// Query parameters for `GET /reports`
#[derive(Debug, Default, Deserialize)]
pub struct ReportFilter {
    pub developer_id: Option<Uuid>,
}

/// Open a report
///
/// The referenced developer must exist and not be deleted, otherwise the
/// request fails with 400 and a `developer_id` detail.
pub async fn create_report(
    State(state): State<AppState>,
    payload: Result<Json<CreateReport>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<ReportIdResponse>>)> {
    let Json(data) = payload?;

    let report_id = state.storage.save_report(data).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(ReportIdResponse { report_id })),
    ))
}

pub async fn get_report(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Envelope<ReportResponse>>> {
    let Path(id) = id?;

    let report = state.storage.get_report_with_tasks(id).await?;

    Ok(Json(Envelope::ok(ReportResponse { report })))
}

pub async fn list_reports(
    State(state): State<AppState>,
    filter: Result<Query<ReportFilter>, QueryRejection>,
) -> ApiResult<Json<Envelope<ReportsResponse>>> {
    let Query(filter) = filter.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected query string");
        ApiError::BadRequest("failed to decode request".to_string())
    })?;

    let reports = match filter.developer_id {
        Some(developer_id) => state.storage.get_reports_by_developer(developer_id).await?,
        None => state.storage.get_reports().await?,
    };

    Ok(Json(Envelope::ok(ReportsResponse { reports })))
}
