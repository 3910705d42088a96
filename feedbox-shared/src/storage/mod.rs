/// Storage component
///
/// `Storage` is the only way the rest of the system reads or writes work-log
/// data. On top of the row-level queries in `models` it:
///
/// - validates every input before touching the database
/// - assigns identifiers through an [`IdGenerator`]
/// - runs each save in a single transaction
/// - hides soft-deleted developers from every read
/// - tags backend failures with the operation that produced them
///
/// # Example
///
/// ```no_run
/// use feedbox_shared::db::pool::DatabaseConfig;
/// use feedbox_shared::models::CreateDeveloper;
/// use feedbox_shared::storage::Storage;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let storage = Storage::connect(&DatabaseConfig::default()).await?;
///
/// let id = storage
///     .save_developer(CreateDeveloper {
///         firstname: "Ada".to_string(),
///         last_name: "Lovelace".to_string(),
///     })
///     .await?;
///
/// let developer = storage.get_developer_by_id(id).await?;
/// assert_eq!(developer.last_name, "Lovelace");
///
/// storage.delete_developer(id).await?;
/// assert!(storage.get_developer_by_id(id).await.is_err());
/// # Ok(())
/// # }
/// ```

pub mod error;
pub mod id;

pub use error::{StorageError, StorageResult};
pub use id::{IdGenerator, SequentialIdGenerator, UuidV4Generator};

use crate::db::{migrations, pool};
use crate::models::{
    CreateDeveloper, CreateProject, CreateReport, CreateTask, Developer, Project, Report, Task,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

const DEVELOPER: &str = "developer";
const PROJECT: &str = "project";
const REPORT: &str = "report";
const TASK: &str = "task";

/// Handle to the work-log database
///
/// Cloning is cheap; clones share the pool and the identifier generator.
#[derive(Clone)]
pub struct Storage {
    pool: PgPool,
    ids: Arc<dyn IdGenerator>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("pool_size", &self.pool.size())
            .finish_non_exhaustive()
    }
}

impl Storage {
    /// Wraps an existing pool and makes sure the schema exists
    pub async fn new(pool: PgPool) -> StorageResult<Self> {
        const OP: &str = "storage.new";

        migrations::run_migrations(&pool)
            .await
            .map_err(|e| StorageError::Backend {
                op: OP,
                source: sqlx::Error::Migrate(Box::new(e)),
            })?;

        Ok(Self::from_pool(pool))
    }

    /// Creates a pool from `config`, then initializes storage on it
    pub async fn connect(config: &pool::DatabaseConfig) -> StorageResult<Self> {
        const OP: &str = "storage.connect";

        let pool = pool::create_pool(config)
            .await
            .map_err(|source| StorageError::Backend { op: OP, source })?;

        Self::new(pool).await
    }

    /// Wraps a pool without running schema setup
    ///
    /// For callers that manage the schema themselves.
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool,
            ids: Arc::new(UuidV4Generator),
        }
    }

    /// Replaces the identifier generator
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // ---------------------------------------------------------------------
    // Developers
    // ---------------------------------------------------------------------

    /// Validates and stores a new developer, returning its ID
    pub async fn save_developer(&self, data: CreateDeveloper) -> StorageResult<Uuid> {
        const OP: &str = "storage.save_developer";

        data.validate()
            .map_err(|errors| StorageError::invalid(DEVELOPER, errors))?;

        let id = self.ids.generate();
        let backend = |e: sqlx::Error| StorageError::backend(OP, DEVELOPER, e);

        let mut tx = self.pool.begin().await.map_err(backend)?;
        let developer = Developer::insert(&mut *tx, id, &data).await.map_err(backend)?;
        tx.commit().await.map_err(backend)?;

        info!(developer_id = %developer.id, "Developer saved");
        Ok(developer.id)
    }

    /// Fetches an active developer
    pub async fn get_developer_by_id(&self, id: Uuid) -> StorageResult<Developer> {
        const OP: &str = "storage.get_developer_by_id";

        Developer::find_active_by_id(&self.pool, id)
            .await
            .map_err(|e| StorageError::backend(OP, DEVELOPER, e))?
            .ok_or_else(|| StorageError::not_found(DEVELOPER, id))
    }

    /// Lists every active developer
    pub async fn get_developers(&self) -> StorageResult<Vec<Developer>> {
        const OP: &str = "storage.get_developers";

        let developers = Developer::list_active(&self.pool)
            .await
            .map_err(|e| StorageError::backend(OP, DEVELOPER, e))?;

        debug!(count = developers.len(), "Listed developers");
        Ok(developers)
    }

    /// Soft-deletes a developer
    ///
    /// Fails with `NotFound` if the developer does not exist or is already
    /// deleted. Reports and tasks of the developer are left untouched.
    pub async fn delete_developer(&self, id: Uuid) -> StorageResult<()> {
        const OP: &str = "storage.delete_developer";

        let deleted = Developer::soft_delete(&self.pool, id)
            .await
            .map_err(|e| StorageError::backend(OP, DEVELOPER, e))?;

        if !deleted {
            debug!(developer_id = %id, "No active developer to delete");
            return Err(StorageError::not_found(DEVELOPER, id));
        }

        info!(developer_id = %id, "Developer soft-deleted");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Projects
    // ---------------------------------------------------------------------

    /// Validates and stores a new project, returning its ID
    pub async fn save_project(&self, data: CreateProject) -> StorageResult<Uuid> {
        const OP: &str = "storage.save_project";

        data.validate()
            .map_err(|errors| StorageError::invalid(PROJECT, errors))?;

        let id = self.ids.generate();
        let backend = |e: sqlx::Error| StorageError::backend(OP, PROJECT, e);

        let mut tx = self.pool.begin().await.map_err(backend)?;
        let project = Project::insert(&mut *tx, id, &data).await.map_err(backend)?;
        tx.commit().await.map_err(backend)?;

        info!(project_id = %project.id, name = %project.name, "Project saved");
        Ok(project.id)
    }

    pub async fn get_project_by_id(&self, id: Uuid) -> StorageResult<Project> {
        const OP: &str = "storage.get_project_by_id";

        Project::find_by_id(&self.pool, id)
            .await
            .map_err(|e| StorageError::backend(OP, PROJECT, e))?
            .ok_or_else(|| StorageError::not_found(PROJECT, id))
    }

    pub async fn get_projects(&self) -> StorageResult<Vec<Project>> {
        const OP: &str = "storage.get_projects";

        Project::list(&self.pool)
            .await
            .map_err(|e| StorageError::backend(OP, PROJECT, e))
    }

    /// Fetches a project together with its tasks
    pub async fn get_project_with_tasks(&self, id: Uuid) -> StorageResult<Project> {
        const OP: &str = "storage.get_project_with_tasks";

        let mut project = self.get_project_by_id(id).await?;
        project.tasks = Task::list_by_project(&self.pool, id)
            .await
            .map_err(|e| StorageError::backend(OP, PROJECT, e))?;

        Ok(project)
    }

    // ---------------------------------------------------------------------
    // Reports
    // ---------------------------------------------------------------------

    /// Stores a new report for an active developer, returning its ID
    ///
    /// The developer row is share-locked for the duration of the insert, so a
    /// concurrent soft delete cannot slip in between the check and the write.
    pub async fn save_report(&self, data: CreateReport) -> StorageResult<Uuid> {
        const OP: &str = "storage.save_report";

        data.validate()
            .map_err(|errors| StorageError::invalid(REPORT, errors))?;

        let id = self.ids.generate();
        let backend = |e: sqlx::Error| StorageError::backend(OP, REPORT, e);

        let mut tx = self.pool.begin().await.map_err(backend)?;

        if Developer::lock_active(&mut *tx, data.developer_id)
            .await
            .map_err(backend)?
            .is_none()
        {
            warn!(developer_id = %data.developer_id, "Report rejected: developer inactive or missing");
            return Err(StorageError::invalid_field(
                REPORT,
                "developer_id",
                "inactive",
                "developer does not exist or was deleted",
            ));
        }

        let report = Report::insert(&mut *tx, id, &data).await.map_err(backend)?;
        tx.commit().await.map_err(backend)?;

        info!(report_id = %report.id, developer_id = %report.developer_id, "Report saved");
        Ok(report.id)
    }

    pub async fn get_report_by_id(&self, id: Uuid) -> StorageResult<Report> {
        const OP: &str = "storage.get_report_by_id";

        Report::find_by_id(&self.pool, id)
            .await
            .map_err(|e| StorageError::backend(OP, REPORT, e))?
            .ok_or_else(|| StorageError::not_found(REPORT, id))
    }

    pub async fn get_reports(&self) -> StorageResult<Vec<Report>> {
        const OP: &str = "storage.get_reports";

        Report::list(&self.pool)
            .await
            .map_err(|e| StorageError::backend(OP, REPORT, e))
    }

    pub async fn get_reports_by_developer(&self, developer_id: Uuid) -> StorageResult<Vec<Report>> {
        const OP: &str = "storage.get_reports_by_developer";

        Report::list_by_developer(&self.pool, developer_id)
            .await
            .map_err(|e| StorageError::backend(OP, REPORT, e))
    }

    /// Fetches a report with its tasks and, if still active, its developer
    pub async fn get_report_with_tasks(&self, id: Uuid) -> StorageResult<Report> {
        const OP: &str = "storage.get_report_with_tasks";
        let backend = |e: sqlx::Error| StorageError::backend(OP, REPORT, e);

        let mut report = self.get_report_by_id(id).await?;
        report.developer = Developer::find_active_by_id(&self.pool, report.developer_id)
            .await
            .map_err(backend)?
            .map(Box::new);
        report.tasks = Task::list_by_report(&self.pool, id).await.map_err(backend)?;

        Ok(report)
    }

    // ---------------------------------------------------------------------
    // Tasks
    // ---------------------------------------------------------------------

    /// Validates and stores a new task, returning its ID
    ///
    /// The referenced report and project must exist.
    pub async fn save_task(&self, data: CreateTask) -> StorageResult<Uuid> {
        const OP: &str = "storage.save_task";

        data.validate()
            .map_err(|errors| StorageError::invalid(TASK, errors))?;

        let id = self.ids.generate();
        let backend = |e: sqlx::Error| StorageError::backend(OP, TASK, e);

        let mut tx = self.pool.begin().await.map_err(backend)?;

        if !Report::lock_exists(&mut *tx, data.report_id).await.map_err(backend)? {
            return Err(StorageError::invalid_field(
                TASK,
                "report_id",
                "missing",
                "report does not exist",
            ));
        }

        if !Project::lock_exists(&mut *tx, data.project_id).await.map_err(backend)? {
            return Err(StorageError::invalid_field(
                TASK,
                "project_id",
                "missing",
                "project does not exist",
            ));
        }

        let task = Task::insert(&mut *tx, id, &data).await.map_err(backend)?;
        tx.commit().await.map_err(backend)?;

        info!(
            task_id = %task.id,
            report_id = %task.report_id,
            project_id = %task.project_id,
            estimate_planed = task.estimate_planed,
            "Task saved"
        );
        Ok(task.id)
    }

    pub async fn get_task_by_id(&self, id: Uuid) -> StorageResult<Task> {
        const OP: &str = "storage.get_task_by_id";

        Task::find_by_id(&self.pool, id)
            .await
            .map_err(|e| StorageError::backend(OP, TASK, e))?
            .ok_or_else(|| StorageError::not_found(TASK, id))
    }

    pub async fn get_tasks(&self) -> StorageResult<Vec<Task>> {
        const OP: &str = "storage.get_tasks";

        Task::list(&self.pool)
            .await
            .map_err(|e| StorageError::backend(OP, TASK, e))
    }

    /// Fetches a task with its report and project filled in
    pub async fn get_task_with_relations(&self, id: Uuid) -> StorageResult<Task> {
        const OP: &str = "storage.get_task_with_relations";
        let backend = |e: sqlx::Error| StorageError::backend(OP, TASK, e);

        let mut task = self.get_task_by_id(id).await?;
        task.report = Report::find_by_id(&self.pool, task.report_id)
            .await
            .map_err(backend)?
            .map(Box::new);
        task.project = Project::find_by_id(&self.pool, task.project_id)
            .await
            .map_err(backend)?
            .map(Box::new);

        Ok(task)
    }

    /// Checks that a task exists
    pub async fn get_calendar(&self, id: Uuid) -> StorageResult<()> {
        const OP: &str = "storage.get_calendar";

        let exists = Task::exists(&self.pool, id)
            .await
            .map_err(|e| StorageError::backend(OP, TASK, e))?;

        if exists {
            Ok(())
        } else {
            Err(StorageError::not_found(TASK, id))
        }
    }
}
