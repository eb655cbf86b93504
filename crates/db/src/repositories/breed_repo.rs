//! Repository for the `breeds` table.

use sqlx::PgPool;

use crate::models::breed::{Breed, CreateBreed};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, catalog_id, name, created_at";

/// Provides upsert and lookup operations for breeds.
pub struct BreedRepo;

impl BreedRepo {
    /// Insert a breed, or return the existing row with the same `catalog_id`.
    ///
    /// Re-inserting a known catalog id is a no-op: the stored name is kept
    /// and the original row (same id) is returned.
    pub async fn create(pool: &PgPool, input: &CreateBreed) -> Result<Breed, sqlx::Error> {
        let query = format!(
            "INSERT INTO breeds (catalog_id, name)
             VALUES ($1, $2)
             ON CONFLICT (catalog_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Breed>(&query)
            .bind(&input.catalog_id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await?;

        if let Some(breed) = inserted {
            return Ok(breed);
        }

        let query = format!("SELECT {COLUMNS} FROM breeds WHERE catalog_id = $1");
        sqlx::query_as::<_, Breed>(&query)
            .bind(&input.catalog_id)
            .fetch_one(pool)
            .await
    }

    /// Find a breed by name, ignoring case and surrounding whitespace.
    ///
    /// If the catalog holds several breeds with the same name, the oldest wins.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Breed>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM breeds
             WHERE lower(name) = lower($1)
             ORDER BY created_at ASC, id ASC
             LIMIT 1"
        );
        sqlx::query_as::<_, Breed>(&query)
            .bind(name.trim())
            .fetch_optional(pool)
            .await
    }

    /// List all breeds, ordered by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Breed>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM breeds ORDER BY name ASC");
        sqlx::query_as::<_, Breed>(&query).fetch_all(pool).await
    }
}
