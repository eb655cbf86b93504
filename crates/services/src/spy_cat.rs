use std::sync::Arc;

use serde::Deserialize;
use spycat_core::error::CoreError;
use spycat_core::spy_cat;
use spycat_core::types::DbId;
use spycat_db::models::spy_cat::{CreateSpyCat, SpyCat};
use validator::Validate;

use crate::error::ServiceResult;
use crate::store::{BreedStore, MissionStore, SpyCatStore, Stores};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Body of `POST /cat/`. `breed` is a breed display name, matched
/// case-insensitively against the synced catalog.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewSpyCat {
    #[validate(length(min = 1, max = 200, message = "cat name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "breed cannot be empty"))]
    pub breed: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "experience cannot be negative"))]
    pub years_experience: i32,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "salary must be >= 0"))]
    pub salary: f64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SalaryUpdate {
    #[validate(range(min = 0.0, message = "salary must be >= 0"))]
    pub salary: f64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExperienceUpdate {
    #[validate(range(min = 0, message = "experience cannot be negative"))]
    pub years_experience: i32,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct SpyCatService {
    cats: Arc<dyn SpyCatStore>,
    breeds: Arc<dyn BreedStore>,
    missions: Arc<dyn MissionStore>,
}

impl SpyCatService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            cats: Arc::clone(&stores.cats),
            breeds: Arc::clone(&stores.breeds),
            missions: Arc::clone(&stores.missions),
        }
    }

    /// Hire a cat. The breed must already exist in the catalog.
    pub async fn create(&self, input: &NewSpyCat) -> ServiceResult<SpyCat> {
        let name = spy_cat::validate_name(&input.name)?;
        let breed_name = spy_cat::validate_breed_name(&input.breed)?;
        spy_cat::validate_experience(input.years_experience)?;
        spy_cat::validate_salary(input.salary)?;

        let breed = self
            .breeds
            .find_by_name(&breed_name)
            .await?
            .ok_or(CoreError::NotFoundByName {
                entity: "Breed",
                name: breed_name,
            })?;

        let cat = self
            .cats
            .create(&CreateSpyCat {
                name,
                breed_id: breed.id,
                years_experience: input.years_experience,
                salary: input.salary,
            })
            .await?;

        tracing::info!(cat_id = %cat.id, breed = %cat.breed.name, "Spy cat created");
        Ok(cat)
    }

    pub async fn get(&self, id: DbId) -> ServiceResult<SpyCat> {
        self.cats
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: "SpyCat", id }.into())
    }

    pub async fn list(&self) -> ServiceResult<Vec<SpyCat>> {
        Ok(self.cats.list().await?)
    }

    pub async fn update_salary(&self, id: DbId, salary: f64) -> ServiceResult<SpyCat> {
        spy_cat::validate_salary(salary)?;
        let cat = self
            .cats
            .update_salary(id, salary)
            .await?
            .ok_or(CoreError::NotFound { entity: "SpyCat", id })?;
        tracing::info!(cat_id = %id, salary, "Spy cat salary updated");
        Ok(cat)
    }

    pub async fn update_experience(&self, id: DbId, years: i32) -> ServiceResult<SpyCat> {
        spy_cat::validate_experience(years)?;
        let cat = self
            .cats
            .update_experience(id, years)
            .await?
            .ok_or(CoreError::NotFound { entity: "SpyCat", id })?;
        tracing::info!(cat_id = %id, years, "Spy cat experience updated");
        Ok(cat)
    }

    /// Remove a cat. Cats on an incomplete mission cannot be removed.
    pub async fn delete(&self, id: DbId) -> ServiceResult<()> {
        self.get(id).await?;
        let active = self.missions.find_active_for_cat(id).await?;
        spy_cat::ensure_cat_deletable(active)?;

        if !self.cats.delete_unless_on_active_mission(id).await? {
            // Assigned between the check and the guarded delete.
            return Err(CoreError::Conflict(
                "cannot delete cat: assigned to an active mission".to_string(),
            )
            .into());
        }
        tracing::info!(cat_id = %id, "Spy cat deleted");
        Ok(())
    }
}
