/// Database models for Feedbox
///
/// Each model owns its row type, its creation input and the SQL that reads
/// and writes its table. Callers outside this crate should go through
/// `storage::Storage`, which adds validation, identifier assignment and
/// transactions on top of these queries.
///
/// # Models
///
/// - `developer`: developers, soft-deletable
/// - `project`: projects that tasks are logged against
/// - `report`: a developer's work report, grouping tasks
/// - `task`: a single work-log entry
///
/// # Relationships
///
/// ```text
/// developers 1 ── * reports 1 ── * tasks * ── 1 projects
/// ```
///
/// Back-references (`Task::report`, `Report::tasks`, ...) are not columns.
/// They stay empty unless a joined read fills them in.

pub mod developer;
pub mod project;
pub mod report;
pub mod task;

pub use developer::{CreateDeveloper, Developer};
pub use project::{CreateProject, Project};
pub use report::{CreateReport, Report};
pub use task::{CreateTask, Task};

use validator::ValidationError;

/// Rejects strings that are empty, contain only whitespace or contain NUL
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    validate_no_nul(value)
}

/// Rejects strings containing a NUL character, which PostgreSQL text cannot store
pub(crate) fn validate_no_nul(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        let mut error = ValidationError::new("nul");
        error.message = Some("must not contain NUL characters".into());
        return Err(error);
    }
    Ok(())
}
