/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `developers`: Developer registration, lookup and soft delete
/// - `projects`: Project creation and lookup
/// - `reports`: Work report creation and lookup
/// - `tasks`: Task entries and the calendar probe
///
/// Successful responses share the [`Envelope`] wrapper; failures are
/// rendered by [`crate::error::ApiError`].

use serde::{Deserialize, Serialize};

pub mod developers;
pub mod health;
pub mod projects;
pub mod reports;
pub mod tasks;

/// Success envelope: `{"status": "ok", ...payload}`
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Always "ok"
    pub status: String,

    /// Payload fields, inlined next to `status`
    #[serde(flatten)]
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: "ok".to_string(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[derive(Serialize)]
    struct Created {
        developer_id: Uuid,
    }

    #[test]
    fn test_envelope_inlines_payload() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(Envelope::ok(Created { developer_id: id })).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "status": "ok", "developer_id": id.to_string() })
        );
    }
}
