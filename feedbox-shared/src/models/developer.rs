/// Developer model and row-level queries
///
/// Developers are never physically removed. Deleting one stamps
/// `deleted_at`, and every read in this module filters those rows out.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE developers (
///     id UUID PRIMARY KEY,
///     firstname VARCHAR(255) NOT NULL,
///     last_name VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     modified_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     deleted_at TIMESTAMPTZ
/// );
/// ```

use super::validate_not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;
use uuid::Uuid;
use validator::Validate;

/// A developer who files reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Developer {
    /// Unique developer ID (UUID)
    pub id: Uuid,

    /// Given name
    pub firstname: String,

    /// Family name
    pub last_name: String,

    /// When the developer was created
    pub created_at: DateTime<Utc>,

    /// When the row was last changed (creation or soft delete)
    pub modified_at: DateTime<Utc>,

    /// When the developer was soft-deleted (None while active)
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Input for creating a new developer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDeveloper {
    #[validate(
        length(max = 255, message = "firstname must be at most 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub firstname: String,

    #[validate(
        length(max = 255, message = "last_name must be at most 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub last_name: String,
}

impl Developer {
    /// Whether the developer has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Inserts a developer with a caller-assigned ID
    ///
    /// Timestamps are assigned by the database.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
        data: &CreateDeveloper,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Developer>(
            r#"
            INSERT INTO developers (id, firstname, last_name)
            VALUES ($1, $2, $3)
            RETURNING id, firstname, last_name, created_at, modified_at, deleted_at
            "#,
        )
        .bind(id)
        .bind(&data.firstname)
        .bind(&data.last_name)
        .fetch_one(executor)
        .await
    }

    /// Finds an active (not soft-deleted) developer by ID
    pub async fn find_active_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Developer>(
            r#"
            SELECT id, firstname, last_name, created_at, modified_at, deleted_at
            FROM developers
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Finds an active developer and holds a share lock on the row
    ///
    /// Must run inside a transaction. A concurrent soft delete blocks until
    /// the transaction ends.
    pub async fn lock_active<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Developer>(
            r#"
            SELECT id, firstname, last_name, created_at, modified_at, deleted_at
            FROM developers
            WHERE id = $1 AND deleted_at IS NULL
            FOR SHARE
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Lists all active developers, oldest first
    pub async fn list_active<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Developer>(
            r#"
            SELECT id, firstname, last_name, created_at, modified_at, deleted_at
            FROM developers
            WHERE deleted_at IS NULL
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(executor)
        .await
    }

    /// Soft-deletes an active developer
    ///
    /// Returns false if no active developer with this ID exists, which
    /// includes developers that were already deleted.
    pub async fn soft_delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE developers
            SET deleted_at = NOW(),
                modified_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
