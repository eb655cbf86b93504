//! Repository for the `missions` table.
//!
//! A mission is always returned with its targets. Creation inserts the
//! mission and every target in one transaction.

use std::collections::HashMap;

use spycat_core::types::DbId;
use sqlx::PgPool;

use crate::models::mission::{CreateMission, Mission, MissionRow};
use crate::models::target::{CreateTarget, Target};
use crate::repositories::TargetRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, description, assigned_cat_id, completed, created_at, updated_at";

/// Provides CRUD operations for missions and their owned targets.
pub struct MissionRepo;

impl MissionRepo {
    /// Insert a mission and its targets atomically.
    ///
    /// Targets are stored in slice order. Any failure rolls back the whole
    /// transaction, so partial mission/target sets never persist.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMission,
        targets: &[CreateTarget],
    ) -> Result<Mission, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO missions (title, description, assigned_cat_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, MissionRow>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.assigned_cat_id)
            .fetch_one(&mut *tx)
            .await?;

        let mut created = Vec::with_capacity(targets.len());
        for (position, target) in targets.iter().enumerate() {
            let target = TargetRepo::insert(&mut *tx, row.id, position as i32, target).await?;
            created.push(target);
        }

        tx.commit().await?;
        Ok(Mission::from_row(row, created))
    }

    /// Find a mission by its internal ID, with targets.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM missions WHERE id = $1");
        let row = sqlx::query_as::<_, MissionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Self::attach_targets(pool, row).await.map(Some),
            None => Ok(None),
        }
    }

    /// List all missions, newest first, each with its targets.
    ///
    /// Targets for every mission are loaded in one batched query.
    pub async fn list(pool: &PgPool) -> Result<Vec<Mission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM missions ORDER BY created_at DESC, id ASC");
        let rows = sqlx::query_as::<_, MissionRow>(&query)
            .fetch_all(pool)
            .await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let mut by_mission: HashMap<DbId, Vec<Target>> = HashMap::new();
        for target in TargetRepo::list_by_missions(pool, &ids).await? {
            by_mission.entry(target.mission_id).or_default().push(target);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let targets = by_mission.remove(&row.id).unwrap_or_default();
                Mission::from_row(row, targets)
            })
            .collect())
    }

    /// Set the completed flag. Returns `None` if the mission does not exist.
    pub async fn update_completed(
        pool: &PgPool,
        id: DbId,
        completed: bool,
    ) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!(
            "UPDATE missions SET completed = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, MissionRow>(&query)
            .bind(id)
            .bind(completed)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Self::attach_targets(pool, row).await.map(Some),
            None => Ok(None),
        }
    }

    /// Assign (or, with `None`, unassign) a cat while the mission is open.
    ///
    /// Returns `None` if the mission is missing or already completed.
    /// A cat already on another active mission trips `uq_missions_active_cat`.
    pub async fn update_assigned_cat(
        pool: &PgPool,
        id: DbId,
        cat_id: Option<DbId>,
    ) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!(
            "UPDATE missions SET assigned_cat_id = $2
             WHERE id = $1 AND completed = false
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, MissionRow>(&query)
            .bind(id)
            .bind(cat_id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Self::attach_targets(pool, row).await.map(Some),
            None => Ok(None),
        }
    }

    /// Delete a mission (cascading to its targets) only if every target is
    /// completed. Returns `true` if a row was removed.
    ///
    /// Locks the mission and its targets first, so a concurrent append or
    /// reopened target is seen before the check.
    pub async fn delete_if_all_targets_completed(
        pool: &PgPool,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM missions WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(false);
        }

        let completed: Vec<bool> =
            sqlx::query_scalar("SELECT completed FROM targets WHERE mission_id = $1 FOR UPDATE")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;
        if completed.iter().any(|done| !done) {
            return Ok(false);
        }

        sqlx::query("DELETE FROM missions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }

    /// Return the id of the incomplete mission a cat is assigned to, if any.
    pub async fn find_active_for_cat(
        pool: &PgPool,
        cat_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id FROM missions
             WHERE assigned_cat_id = $1 AND completed = false
             LIMIT 1",
        )
        .bind(cat_id)
        .fetch_optional(pool)
        .await
    }

    async fn attach_targets(pool: &PgPool, row: MissionRow) -> Result<Mission, sqlx::Error> {
        let targets = TargetRepo::list_by_mission(pool, row.id).await?;
        Ok(Mission::from_row(row, targets))
    }
}
