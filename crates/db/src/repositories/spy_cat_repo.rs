//! Repository for the `cats` table.
//!
//! Cats are always read joined with their breed, so every statement that
//! returns a cat selects through [`CAT_COLUMNS`] with `c` (cats) and `b`
//! (breeds) aliases.

use spycat_core::types::DbId;
use sqlx::PgPool;

use crate::models::spy_cat::{CreateSpyCat, SpyCat, SpyCatRow};

/// Projection of a cat joined with its breed.
const CAT_COLUMNS: &str = "c.id, c.name, c.years_experience, c.salary, c.created_at, c.updated_at, \
     b.id AS breed_id, b.catalog_id AS breed_catalog_id, b.name AS breed_name, \
     b.created_at AS breed_created_at";

/// Provides CRUD operations for spy cats.
pub struct SpyCatRepo;

impl SpyCatRepo {
    /// Insert a new cat, returning it with its breed attached.
    pub async fn create(pool: &PgPool, input: &CreateSpyCat) -> Result<SpyCat, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                INSERT INTO cats (name, breed_id, years_experience, salary)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT {CAT_COLUMNS} FROM c JOIN breeds b ON b.id = c.breed_id"
        );
        let row = sqlx::query_as::<_, SpyCatRow>(&query)
            .bind(&input.name)
            .bind(input.breed_id)
            .bind(input.years_experience)
            .bind(input.salary)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Find a cat by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SpyCat>, sqlx::Error> {
        let query = format!(
            "SELECT {CAT_COLUMNS} FROM cats c
             JOIN breeds b ON b.id = c.breed_id
             WHERE c.id = $1"
        );
        let row = sqlx::query_as::<_, SpyCatRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(SpyCat::from))
    }

    /// List all cats, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<SpyCat>, sqlx::Error> {
        let query = format!(
            "SELECT {CAT_COLUMNS} FROM cats c
             JOIN breeds b ON b.id = c.breed_id
             ORDER BY c.created_at ASC, c.id ASC"
        );
        let rows = sqlx::query_as::<_, SpyCatRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(SpyCat::from).collect())
    }

    /// Set a cat's salary. Returns `None` if no row with the given `id` exists.
    pub async fn update_salary(
        pool: &PgPool,
        id: DbId,
        salary: f64,
    ) -> Result<Option<SpyCat>, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                UPDATE cats SET salary = $2 WHERE id = $1 RETURNING *
             )
             SELECT {CAT_COLUMNS} FROM c JOIN breeds b ON b.id = c.breed_id"
        );
        let row = sqlx::query_as::<_, SpyCatRow>(&query)
            .bind(id)
            .bind(salary)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(SpyCat::from))
    }

    /// Set a cat's years of experience. Returns `None` if the cat does not exist.
    pub async fn update_experience(
        pool: &PgPool,
        id: DbId,
        years_experience: i32,
    ) -> Result<Option<SpyCat>, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                UPDATE cats SET years_experience = $2 WHERE id = $1 RETURNING *
             )
             SELECT {CAT_COLUMNS} FROM c JOIN breeds b ON b.id = c.breed_id"
        );
        let row = sqlx::query_as::<_, SpyCatRow>(&query)
            .bind(id)
            .bind(years_experience)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(SpyCat::from))
    }

    /// Delete a cat unless it is assigned to an incomplete mission.
    ///
    /// Returns `true` if a row was removed. `false` means the cat is either
    /// missing or still on an active mission; callers check which.
    ///
    /// The cat row is locked first. Assignments take a key-share lock on it
    /// through the foreign key, so one in flight finishes before the check.
    pub async fn delete_unless_on_active_mission(
        pool: &PgPool,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM cats WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(false);
        }

        let completed: Vec<bool> = sqlx::query_scalar(
            "SELECT completed FROM missions WHERE assigned_cat_id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;
        if completed.iter().any(|done| !done) {
            return Ok(false);
        }

        sqlx::query("DELETE FROM cats WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }
}
