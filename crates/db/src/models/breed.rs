//! Breed entity model and DTOs.

use serde::{Deserialize, Serialize};
use spycat_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A breed row from the `breeds` table. Immutable once created.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Breed {
    pub id: DbId,
    /// Identifier assigned by the external breed catalog. Unique.
    pub catalog_id: String,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for inserting (or re-inserting) a breed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBreed {
    pub catalog_id: String,
    pub name: String,
}
