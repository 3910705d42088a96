/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use feedbox_api::{app::AppState, config::Config};
/// use feedbox_shared::storage::Storage;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::load()?;
/// let storage = Storage::connect(&config.database).await?;
/// let state = AppState::new(storage, config);
/// let app = feedbox_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, routes};
use axum::{
    routing::{get, post},
    Router,
};
use feedbox_shared::storage::Storage;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Persistence layer
    pub storage: Storage,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(storage: Storage, config: Config) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET    /health
/// ├── POST   /developer
/// ├── GET    /developer/:id
/// ├── DELETE /developer/:id
/// ├── GET    /developers
/// ├── POST   /project
/// ├── GET    /project/:id
/// ├── GET    /projects
/// ├── POST   /report
/// ├── GET    /report/:id
/// ├── GET    /reports
/// ├── POST   /task
/// ├── GET    /task/:id
/// ├── GET    /task/:id/calendar
/// └── GET    /tasks
/// ```
pub fn build_router(state: AppState) -> Router {
    let developer_routes = Router::new()
        .route("/developer", post(routes::developers::create_developer))
        .route(
            "/developer/:id",
            get(routes::developers::get_developer).delete(routes::developers::delete_developer),
        )
        .route("/developers", get(routes::developers::list_developers));

    let project_routes = Router::new()
        .route("/project", post(routes::projects::create_project))
        .route("/project/:id", get(routes::projects::get_project))
        .route("/projects", get(routes::projects::list_projects));

    let report_routes = Router::new()
        .route("/report", post(routes::reports::create_report))
        .route("/report/:id", get(routes::reports::get_report))
        .route("/reports", get(routes::reports::list_reports));

    let task_routes = Router::new()
        .route("/task", post(routes::tasks::create_task))
        .route("/task/:id", get(routes::tasks::get_task))
        .route("/task/:id/calendar", get(routes::tasks::get_calendar))
        .route("/tasks", get(routes::tasks::list_tasks));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(developer_routes)
        .merge(project_routes)
        .merge(report_routes)
        .merge(task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
