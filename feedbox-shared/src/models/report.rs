/// Report model and row-level queries
///
/// A report belongs to one developer and groups the tasks that developer
/// logged for it.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE reports (
///     id UUID PRIMARY KEY,
///     developer_id UUID NOT NULL REFERENCES developers(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use super::{developer::Developer, task::Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;
use uuid::Uuid;
use validator::Validate;

/// A developer's work report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Report {
    /// Unique report ID (UUID)
    pub id: Uuid,

    /// Developer who owns the report
    pub developer_id: Uuid,

    /// When the report was created
    pub created_at: DateTime<Utc>,

    /// Owning developer, when joined and still active
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<Box<Developer>>,

    /// Tasks logged in this report, when joined
    #[sqlx(skip)]
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Input for creating a new report
///
/// The developer reference is checked against the database at save time,
/// so there is nothing to validate declaratively beyond its shape.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReport {
    pub developer_id: Uuid,
}

impl Report {
    /// Inserts a report with a caller-assigned ID
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
        data: &CreateReport,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (id, developer_id)
            VALUES ($1, $2)
            RETURNING id, developer_id, created_at
            "#,
        )
        .bind(id)
        .bind(data.developer_id)
        .fetch_one(executor)
        .await
    }

    /// Finds a report by ID
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, developer_id, created_at
            FROM reports
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Checks whether a report exists, locking it against concurrent changes
    ///
    /// Must run inside a transaction.
    pub async fn lock_exists<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<bool, sqlx::Error> {
        let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM reports WHERE id = $1 FOR SHARE")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(row.is_some())
    }

    /// Lists all reports, oldest first
    pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, developer_id, created_at
            FROM reports
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(executor)
        .await
    }

    /// Lists the reports of one developer, oldest first
    ///
    /// Soft-deleted developers keep their reports, so this does not look at
    /// `developers.deleted_at`.
    pub async fn list_by_developer<'e>(
        executor: impl PgExecutor<'e>,
        developer_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, developer_id, created_at
            FROM reports
            WHERE developer_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(developer_id)
        .fetch_all(executor)
        .await
    }
}
