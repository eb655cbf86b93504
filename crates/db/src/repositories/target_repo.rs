//! Repository for the `targets` table.
//!
//! Appending and removing targets lock the owning mission row
//! (`SELECT ... FOR UPDATE`) so the per-mission target bounds hold under
//! concurrent requests.

use spycat_core::mission::{MAX_TARGETS, MIN_TARGETS};
use spycat_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::target::{CreateTarget, Target, TargetInsert, TargetRemoval};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, mission_id, position, name, country, notes, completed, created_at, updated_at";

/// Provides CRUD operations for mission targets.
pub struct TargetRepo;

impl TargetRepo {
    /// Insert a single target row at `position` using any executor.
    ///
    /// Used inside the mission-creation transaction and by [`Self::create`].
    pub(crate) async fn insert<'e, E>(
        executor: E,
        mission_id: DbId,
        position: i32,
        input: &CreateTarget,
    ) -> Result<Target, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO targets (mission_id, position, name, country, notes)
             VALUES ($1, $2, $3, $4, COALESCE($5, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Target>(&query)
            .bind(mission_id)
            .bind(position)
            .bind(&input.name)
            .bind(&input.country)
            .bind(&input.notes)
            .fetch_one(executor)
            .await
    }

    /// Append a target to an existing mission.
    ///
    /// Runs in a transaction holding a row lock on the mission, so the
    /// [`MAX_TARGETS`] cap and the completed flag are checked atomically
    /// with the insert.
    pub async fn create(
        pool: &PgPool,
        mission_id: DbId,
        input: &CreateTarget,
    ) -> Result<TargetInsert, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mission_completed: Option<bool> =
            sqlx::query_scalar("SELECT completed FROM missions WHERE id = $1 FOR UPDATE")
                .bind(mission_id)
                .fetch_optional(&mut *tx)
                .await?;

        match mission_completed {
            None => return Ok(TargetInsert::MissionMissing),
            Some(true) => return Ok(TargetInsert::MissionCompleted),
            Some(false) => {}
        }

        let (count, next_position): (i64, i32) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(MAX(position) + 1, 0)
             FROM targets WHERE mission_id = $1",
        )
        .bind(mission_id)
        .fetch_one(&mut *tx)
        .await?;

        if count >= MAX_TARGETS as i64 {
            return Ok(TargetInsert::LimitReached);
        }

        let target = Self::insert(&mut *tx, mission_id, next_position, input).await?;
        tx.commit().await?;
        Ok(TargetInsert::Created(target))
    }

    /// Find a target by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Target>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM targets WHERE id = $1");
        sqlx::query_as::<_, Target>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the targets of a mission in input order.
    pub async fn list_by_mission(
        pool: &PgPool,
        mission_id: DbId,
    ) -> Result<Vec<Target>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM targets
             WHERE mission_id = $1
             ORDER BY position ASC"
        );
        sqlx::query_as::<_, Target>(&query)
            .bind(mission_id)
            .fetch_all(pool)
            .await
    }

    /// List the targets of several missions, grouped by mission then position.
    pub async fn list_by_missions(
        pool: &PgPool,
        mission_ids: &[DbId],
    ) -> Result<Vec<Target>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM targets
             WHERE mission_id = ANY($1)
             ORDER BY mission_id, position ASC"
        );
        sqlx::query_as::<_, Target>(&query)
            .bind(mission_ids)
            .fetch_all(pool)
            .await
    }

    /// Set the completed flag. Returns `None` if the target does not exist.
    pub async fn update_completed(
        pool: &PgPool,
        id: DbId,
        completed: bool,
    ) -> Result<Option<Target>, sqlx::Error> {
        let query = format!(
            "UPDATE targets SET completed = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Target>(&query)
            .bind(id)
            .bind(completed)
            .fetch_optional(pool)
            .await
    }

    /// Replace a target's notes while both it and its mission are incomplete.
    ///
    /// Returns `None` if the target is missing or either side is completed.
    pub async fn update_notes(
        pool: &PgPool,
        id: DbId,
        notes: &str,
    ) -> Result<Option<Target>, sqlx::Error> {
        sqlx::query_as::<_, Target>(
            "UPDATE targets t SET notes = $2
             FROM missions m
             WHERE t.id = $1
               AND m.id = t.mission_id
               AND t.completed = false
               AND m.completed = false
             RETURNING t.id, t.mission_id, t.position, t.name, t.country, t.notes,
                       t.completed, t.created_at, t.updated_at",
        )
        .bind(id)
        .bind(notes)
        .fetch_optional(pool)
        .await
    }

    /// Delete a target unless it is the last one left on its mission.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<TargetRemoval, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mission_id: Option<DbId> =
            sqlx::query_scalar("SELECT mission_id FROM targets WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(mission_id) = mission_id else {
            return Ok(TargetRemoval::Missing);
        };

        sqlx::query("SELECT id FROM missions WHERE id = $1 FOR UPDATE")
            .bind(mission_id)
            .execute(&mut *tx)
            .await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM targets WHERE mission_id = $1")
            .bind(mission_id)
            .fetch_one(&mut *tx)
            .await?;
        if count <= MIN_TARGETS as i64 {
            return Ok(TargetRemoval::LastTarget);
        }

        let result = sqlx::query("DELETE FROM targets WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(TargetRemoval::Missing);
        }

        tx.commit().await?;
        Ok(TargetRemoval::Deleted)
    }
}
