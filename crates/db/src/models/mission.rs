//! Mission entity model and DTOs.

use serde::{Deserialize, Serialize};
use spycat_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::target::Target;

/// A row from the `missions` table, without its targets.
#[derive(Debug, Clone, FromRow)]
pub struct MissionRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub assigned_cat_id: Option<DbId>,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A mission with its owned targets in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mission {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub assigned_cat_id: Option<DbId>,
    pub completed: bool,
    pub targets: Vec<Target>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Mission {
    /// Attach loaded targets to a mission row.
    pub fn from_row(row: MissionRow, targets: Vec<Target>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            assigned_cat_id: row.assigned_cat_id,
            completed: row.completed,
            targets,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    /// Number of targets not yet completed.
    pub fn incomplete_targets(&self) -> usize {
        self.targets.iter().filter(|t| !t.completed).count()
    }
}

/// DTO for inserting a mission row. Targets are supplied separately.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMission {
    pub title: String,
    pub description: Option<String>,
    pub assigned_cat_id: Option<DbId>,
}
