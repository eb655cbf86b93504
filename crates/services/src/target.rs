use std::sync::Arc;

use serde::Deserialize;
use spycat_core::error::CoreError;
use spycat_core::mission::{
    ensure_can_add_target, ensure_can_delete_target, ensure_notes_editable, last_target,
    limit_reached, validate_target_fields,
};
use spycat_core::types::DbId;
use spycat_db::models::mission::Mission;
use spycat_db::models::target::{CreateTarget, Target, TargetInsert, TargetRemoval};
use validator::Validate;

use crate::error::ServiceResult;
use crate::store::{MissionStore, Stores, TargetStore};

/// Body of `POST /target/`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMissionTarget {
    pub mission_id: DbId,
    #[validate(length(min = 1, message = "target name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "target country cannot be empty"))]
    pub country: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `PUT /target/{id}/notes`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NotesUpdate {
    #[validate(length(max = 10000, message = "notes cannot exceed 10000 characters"))]
    pub notes: String,
}

#[derive(Clone)]
pub struct TargetService {
    targets: Arc<dyn TargetStore>,
    missions: Arc<dyn MissionStore>,
}

impl TargetService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            targets: Arc::clone(&stores.targets),
            missions: Arc::clone(&stores.missions),
        }
    }

    /// Append a target to an incomplete mission below the target cap.
    pub async fn create(&self, input: &NewMissionTarget) -> ServiceResult<Target> {
        let (name, country) = validate_target_fields(&input.name, &input.country)?;
        let mission = self.mission(input.mission_id).await?;
        ensure_can_add_target(mission.targets.len(), mission.completed)?;

        let insert = CreateTarget {
            name,
            country,
            notes: input.notes.clone(),
        };
        let target = match self.targets.create(mission.id, &insert).await? {
            TargetInsert::Created(target) => target,
            TargetInsert::MissionMissing => {
                return Err(CoreError::NotFound { entity: "Mission", id: mission.id }.into());
            }
            TargetInsert::MissionCompleted => {
                let reason = "cannot add target: mission completed".to_string();
                return Err(CoreError::Conflict(reason).into());
            }
            TargetInsert::LimitReached => return Err(limit_reached().into()),
        };

        tracing::info!(target_id = %target.id, mission_id = %mission.id, "Target added");
        Ok(target)
    }

    pub async fn get(&self, id: DbId) -> ServiceResult<Target> {
        self.targets
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Target", id }.into())
    }

    pub async fn update_completed(&self, id: DbId, completed: bool) -> ServiceResult<Target> {
        let target = self
            .targets
            .update_completed(id, completed)
            .await?
            .ok_or(CoreError::NotFound { entity: "Target", id })?;
        tracing::info!(target_id = %id, completed, "Target completion updated");
        Ok(target)
    }

    /// Replace a target's notes while both it and its mission are open.
    pub async fn update_notes(&self, id: DbId, notes: &str) -> ServiceResult<Target> {
        let target = self.get(id).await?;
        let mission = self.mission(target.mission_id).await?;
        ensure_notes_editable(target.completed, mission.completed)?;

        let target = self.targets.update_notes(id, notes).await?.ok_or_else(|| {
            CoreError::Conflict("cannot update notes: target or mission completed".to_string())
        })?;
        tracing::info!(target_id = %id, "Target notes updated");
        Ok(target)
    }

    /// Remove a target unless it is the mission's last one.
    pub async fn delete(&self, id: DbId) -> ServiceResult<()> {
        let target = self.get(id).await?;
        let mission = self.mission(target.mission_id).await?;
        ensure_can_delete_target(mission.targets.len())?;

        match self.targets.delete(id).await? {
            TargetRemoval::Deleted => {
                tracing::info!(target_id = %id, mission_id = %mission.id, "Target deleted");
                Ok(())
            }
            TargetRemoval::Missing => Err(CoreError::NotFound { entity: "Target", id }.into()),
            TargetRemoval::LastTarget => Err(last_target().into()),
        }
    }

    async fn mission(&self, id: DbId) -> ServiceResult<Mission> {
        self.missions
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Mission", id }.into())
    }
}
