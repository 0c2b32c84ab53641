//! File attachment record inspected by the sharing gate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::project::ProjectId;

/// Attachment metadata. Storage of the bytes is an external concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub project_id: Option<ProjectId>,
}

impl FileRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            project_id: None,
        }
    }
}
