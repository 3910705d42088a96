/// Storage error taxonomy
///
/// Every storage operation fails with exactly one of three kinds:
///
/// - `InvalidData`: the caller's input broke a validation rule or referenced
///   a row that does not exist
/// - `NotFound`: no matching active row
/// - `Backend`: the database failed; `op` names the storage operation
use thiserror::Error;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

/// SQLSTATE for foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// SQLSTATE for check_violation
const CHECK_VIOLATION: &str = "23514";

/// SQLSTATE class for data exceptions (bad encoding, out-of-range values)
const DATA_EXCEPTION_CLASS: &str = "22";

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("invalid {entity} data: {errors}")]
    InvalidData {
        entity: &'static str,
        #[source]
        errors: ValidationErrors,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{op}: {source}")]
    Backend {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl StorageError {
    pub fn invalid(entity: &'static str, errors: ValidationErrors) -> Self {
        StorageError::InvalidData { entity, errors }
    }

    /// Invalid data caused by a single field
    pub fn invalid_field(
        entity: &'static str,
        field: &'static str,
        code: &'static str,
        message: &'static str,
    ) -> Self {
        let mut error = ValidationError::new(code);
        error.message = Some(message.into());

        let mut errors = ValidationErrors::new();
        errors.add(field, error);
        Self::invalid(entity, errors)
    }

    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        StorageError::NotFound { entity, id }
    }

    /// Wraps a backend failure with the name of the failing operation
    ///
    /// Errors that can only come from caller input (a dangling foreign key,
    /// a failed CHECK, a value Postgres cannot represent) are reported as
    /// `InvalidData`.
    pub fn backend(op: &'static str, entity: &'static str, source: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &source {
            match db_err.code().as_deref() {
                Some(FOREIGN_KEY_VIOLATION) => {
                    return Self::invalid_field(
                        entity,
                        "reference",
                        "foreign_key",
                        "referenced record does not exist",
                    );
                }
                Some(CHECK_VIOLATION) => {
                    return Self::invalid_field(
                        entity,
                        "constraint",
                        "check",
                        "value violates a table constraint",
                    );
                }
                Some(code) if code.starts_with(DATA_EXCEPTION_CLASS) => {
                    return Self::invalid_field(
                        entity,
                        "value",
                        "data_exception",
                        "value cannot be stored",
                    );
                }
                _ => {}
            }
        }

        StorageError::Backend { op, source }
    }

    pub fn is_invalid_data(&self) -> bool {
        matches!(self, StorageError::InvalidData { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }

    pub fn is_backend(&self) -> bool {
        matches!(self, StorageError::Backend { .. })
    }
}
