/// Project model and row-level queries
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     modified_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use super::{task::Task, validate_no_nul, validate_not_blank};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;
use uuid::Uuid;
use validator::Validate;

/// A project that tasks are logged against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID (UUID)
    pub id: Uuid,

    /// Project name
    pub name: String,

    /// Free-text description (may be empty)
    pub description: String,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last changed
    pub modified_at: DateTime<Utc>,

    /// Tasks logged against this project
    ///
    /// Only populated by `Storage::get_project_with_tasks`.
    #[sqlx(skip)]
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(
        length(max = 255, message = "name must be at most 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = "validate_no_nul"))]
    pub description: String,
}

impl Project {
    /// Inserts a project with a caller-assigned ID
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
        data: &CreateProject,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, created_at, modified_at
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(executor)
        .await
    }

    /// Finds a project by ID
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, created_at, modified_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Checks whether a project exists, locking it against concurrent changes
    ///
    /// Must run inside a transaction.
    pub async fn lock_exists<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<bool, sqlx::Error> {
        let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM projects WHERE id = $1 FOR SHARE")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(row.is_some())
    }

    /// Lists all projects, oldest first
    pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, created_at, modified_at
            FROM projects
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(executor)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_validation() {
        let valid = CreateProject {
            name: "Feedbox".to_string(),
            description: String::new(),
        };
        assert!(valid.validate().is_ok());

        let blank = CreateProject {
            name: " ".to_string(),
            description: "something".to_string(),
        };
        let errors = blank.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let input: CreateProject = serde_json::from_str(r#"{"name": "Feedbox"}"#).unwrap();
        assert_eq!(input.description, "");
    }
}
