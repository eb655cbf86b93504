//! Target entity model, DTOs, and guarded-write outcomes.

use serde::{Deserialize, Serialize};
use spycat_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `targets` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Target {
    pub id: DbId,
    pub mission_id: DbId,
    /// Zero-based order within the owning mission.
    pub position: i32,
    pub name: String,
    pub country: String,
    pub notes: String,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a target. `notes` defaults to an empty string.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTarget {
    pub name: String,
    pub country: String,
    pub notes: Option<String>,
}

/// Outcome of appending a target to an existing mission.
#[derive(Debug)]
pub enum TargetInsert {
    Created(Target),
    MissionMissing,
    MissionCompleted,
    LimitReached,
}

/// Outcome of removing a target from its mission.
#[derive(Debug, PartialEq, Eq)]
pub enum TargetRemoval {
    Deleted,
    Missing,
    LastTarget,
}
