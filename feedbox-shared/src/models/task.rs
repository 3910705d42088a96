/// Task model and row-level queries
///
/// A task is one work-log entry: what was worked on, for which project, in
/// which report, how long it was planned to take and how far it got.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY,
///     report_id UUID NOT NULL REFERENCES reports(id) ON DELETE CASCADE,
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     name TEXT NOT NULL,
///     developer_note TEXT,
///     estimate_planed INTEGER NOT NULL CHECK (estimate_planed > 0),
///     estimate_progress INTEGER NOT NULL DEFAULT 0 CHECK (estimate_progress >= 0),
///     start_timestamp TIMESTAMPTZ NOT NULL,
///     end_timestamp TIMESTAMPTZ NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT tasks_time_window CHECK (end_timestamp >= start_timestamp)
/// );
/// ```

use super::{project::Project, report::Report, validate_no_nul, validate_not_blank};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A work-log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (UUID)
    pub id: Uuid,

    /// Report this task was logged in
    pub report_id: Uuid,

    /// Project this task was worked on for
    pub project_id: Uuid,

    /// Short task name
    pub name: String,

    /// Free-text note from the developer
    pub developer_note: Option<String>,

    /// Planned effort in minutes (always > 0)
    pub estimate_planed: i32,

    /// Effort spent so far in minutes
    pub estimate_progress: i32,

    /// When work started
    pub start_timestamp: DateTime<Utc>,

    /// When work ended (never before `start_timestamp`)
    pub end_timestamp: DateTime<Utc>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<Box<Report>>,

    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Box<Project>>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_time_window"))]
pub struct CreateTask {
    pub report_id: Uuid,

    pub project_id: Uuid,

    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = "validate_no_nul"))]
    pub developer_note: Option<String>,

    #[validate(range(min = 1, message = "estimate_planed must be greater than zero"))]
    pub estimate_planed: i32,

    #[serde(default)]
    #[validate(range(min = 0, message = "estimate_progress must not be negative"))]
    pub estimate_progress: i32,

    pub start_timestamp: DateTime<Utc>,

    pub end_timestamp: DateTime<Utc>,
}

fn validate_time_window(task: &CreateTask) -> Result<(), ValidationError> {
    if task.end_timestamp < task.start_timestamp {
        let mut error = ValidationError::new("time_window");
        error.message = Some("end_timestamp must not precede start_timestamp".into());
        return Err(error);
    }
    Ok(())
}

impl Task {
    /// Inserts a task with a caller-assigned ID
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
        data: &CreateTask,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (
                id, report_id, project_id, name, developer_note,
                estimate_planed, estimate_progress, start_timestamp, end_timestamp
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, report_id, project_id, name, developer_note, estimate_planed,
                      estimate_progress, start_timestamp, end_timestamp, created_at
            "#,
        )
        .bind(id)
        .bind(data.report_id)
        .bind(data.project_id)
        .bind(&data.name)
        .bind(&data.developer_note)
        .bind(data.estimate_planed)
        .bind(data.estimate_progress)
        .bind(data.start_timestamp)
        .bind(data.end_timestamp)
        .fetch_one(executor)
        .await
    }

    /// Finds a task by ID
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, report_id, project_id, name, developer_note, estimate_planed,
                   estimate_progress, start_timestamp, end_timestamp, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Checks whether a task with this ID exists
    pub async fn exists<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tasks WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    /// Lists all tasks, oldest first
    pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, report_id, project_id, name, developer_note, estimate_planed,
                   estimate_progress, start_timestamp, end_timestamp, created_at
            FROM tasks
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(executor)
        .await
    }

    /// Lists the tasks of one report in the order they were worked on
    pub async fn list_by_report<'e>(
        executor: impl PgExecutor<'e>,
        report_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, report_id, project_id, name, developer_note, estimate_planed,
                   estimate_progress, start_timestamp, end_timestamp, created_at
            FROM tasks
            WHERE report_id = $1
            ORDER BY start_timestamp ASC, id ASC
            "#,
        )
        .bind(report_id)
        .fetch_all(executor)
        .await
    }

    /// Lists the tasks of one project in the order they were worked on
    pub async fn list_by_project<'e>(
        executor: impl PgExecutor<'e>,
        project_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, report_id, project_id, name, developer_note, estimate_planed,
                   estimate_progress, start_timestamp, end_timestamp, created_at
            FROM tasks
            WHERE project_id = $1
            ORDER BY start_timestamp ASC, id ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(executor)
        .await
    }
}
