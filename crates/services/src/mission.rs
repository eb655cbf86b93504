use std::sync::Arc;

use serde::{Deserialize, Serialize};
use spycat_core::error::CoreError;
use spycat_core::mission::{
    ensure_assignment_open, ensure_mission_deletable, optional_text, require_text,
    validate_target_count, validate_target_fields,
};
use spycat_core::spy_cat::ensure_cat_available;
use spycat_core::types::DbId;
use spycat_db::models::mission::{CreateMission, Mission};
use spycat_db::models::target::CreateTarget;
use validator::Validate;

use crate::error::{assignment_error, ServiceResult};
use crate::store::{MissionStore, SpyCatStore, Stores};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Body of `POST /mission/`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMission {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub assigned_cat_id: Option<DbId>,
    #[validate(length(min = 1, max = 3, message = "mission must have between 1 and 3 targets"))]
    #[validate(nested)]
    pub targets: Vec<NewTarget>,
}

/// A target supplied inline with a new mission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewTarget {
    #[validate(length(min = 1, message = "target name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "target country cannot be empty"))]
    pub country: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of the mission and target `completed` endpoints.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct CompletedUpdate {
    pub completed: bool,
}

/// Body of `PUT /mission/{id}/assign`. `null` unassigns.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct AssignCat {
    pub cat_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct MissionService {
    missions: Arc<dyn MissionStore>,
    cats: Arc<dyn SpyCatStore>,
}

impl MissionService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            missions: Arc::clone(&stores.missions),
            cats: Arc::clone(&stores.cats),
        }
    }

    /// Create a mission together with its targets.
    ///
    /// Every rule is checked before anything is written, and the store
    /// persists the mission and its targets in one transaction.
    pub async fn create(&self, input: &NewMission) -> ServiceResult<Mission> {
        let title = require_text("title", &input.title)?;
        validate_target_count(input.targets.len())?;
        let targets = input
            .targets
            .iter()
            .map(|t| {
                let (name, country) = validate_target_fields(&t.name, &t.country)?;
                Ok(CreateTarget {
                    name,
                    country,
                    notes: t.notes.clone(),
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        if let Some(cat_id) = input.assigned_cat_id {
            self.ensure_cat_assignable(cat_id, None).await?;
        }

        let mission = self
            .missions
            .create(
                &CreateMission {
                    title,
                    description: optional_text(input.description.as_deref()),
                    assigned_cat_id: input.assigned_cat_id,
                },
                &targets,
            )
            .await
            .map_err(|e| assignment_error(e, input.assigned_cat_id))?;

        tracing::info!(
            mission_id = %mission.id,
            targets = mission.targets.len(),
            "Mission created"
        );
        Ok(mission)
    }

    pub async fn get(&self, id: DbId) -> ServiceResult<Mission> {
        self.missions
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Mission", id }.into())
    }

    pub async fn list(&self) -> ServiceResult<Vec<Mission>> {
        Ok(self.missions.list().await?)
    }

    /// Set the completion flag. Reopening a mission whose cat has since
    /// taken another one is a conflict.
    pub async fn update_completed(&self, id: DbId, completed: bool) -> ServiceResult<Mission> {
        let mission = self
            .missions
            .update_completed(id, completed)
            .await
            .map_err(|e| assignment_error(e, None))?
            .ok_or(CoreError::NotFound { entity: "Mission", id })?;
        tracing::info!(mission_id = %id, completed, "Mission completion updated");
        Ok(mission)
    }

    /// Assign a cat to an incomplete mission, or unassign with `None`.
    pub async fn assign_cat(&self, id: DbId, cat_id: Option<DbId>) -> ServiceResult<Mission> {
        let mission = self.get(id).await?;
        ensure_assignment_open(mission.completed)?;
        if mission.assigned_cat_id == cat_id {
            return Ok(mission);
        }
        if let Some(cat_id) = cat_id {
            self.ensure_cat_assignable(cat_id, Some(id)).await?;
        }

        let mission = self
            .missions
            .update_assigned_cat(id, cat_id)
            .await
            .map_err(|e| assignment_error(e, cat_id))?
            .ok_or_else(|| {
                CoreError::Conflict("cannot change assigned cat: mission completed".to_string())
            })?;

        tracing::info!(mission_id = %id, cat_id = ?cat_id, "Mission assignment updated");
        Ok(mission)
    }

    /// Delete a mission once all of its targets are completed.
    pub async fn delete(&self, id: DbId) -> ServiceResult<()> {
        let mission = self.get(id).await?;
        ensure_mission_deletable(mission.incomplete_targets())?;

        if !self.missions.delete_if_all_targets_completed(id).await? {
            return Err(CoreError::Conflict(
                "cannot delete mission: targets still incomplete".to_string(),
            )
            .into());
        }
        tracing::info!(mission_id = %id, "Mission deleted");
        Ok(())
    }

    async fn ensure_cat_assignable(
        &self,
        cat_id: DbId,
        for_mission: Option<DbId>,
    ) -> ServiceResult<()> {
        if self.cats.find_by_id(cat_id).await?.is_none() {
            return Err(CoreError::NotFound { entity: "SpyCat", id: cat_id }.into());
        }
        let active = self.missions.find_active_for_cat(cat_id).await?;
        ensure_cat_available(cat_id, active, for_mission)?;
        Ok(())
    }
}
