//! Spy cat entity model and DTOs.

use serde::{Deserialize, Serialize};
use spycat_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::breed::Breed;

/// A cat together with its breed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpyCat {
    pub id: DbId,
    pub name: String,
    pub breed: Breed,
    pub years_experience: i32,
    pub salary: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Flat row produced by joining `cats` with `breeds`.
#[derive(Debug, Clone, FromRow)]
pub struct SpyCatRow {
    pub id: DbId,
    pub name: String,
    pub years_experience: i32,
    pub salary: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub breed_id: DbId,
    pub breed_catalog_id: String,
    pub breed_name: String,
    pub breed_created_at: Timestamp,
}

impl From<SpyCatRow> for SpyCat {
    fn from(row: SpyCatRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            breed: Breed {
                id: row.breed_id,
                catalog_id: row.breed_catalog_id,
                name: row.breed_name,
                created_at: row.breed_created_at,
            },
            years_experience: row.years_experience,
            salary: row.salary,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for inserting a cat. The breed is already resolved to its id.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSpyCat {
    pub name: String,
    pub breed_id: DbId,
    pub years_experience: i32,
    pub salary: f64,
}
