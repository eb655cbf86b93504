use std::sync::Arc;

use spycat_core::error::CoreError;
use spycat_core::mission::require_text;
use spycat_db::models::breed::{Breed, CreateBreed};

use crate::error::ServiceResult;
use crate::store::BreedStore;

/// Breed reference data: written by catalog sync, read by cat creation.
#[derive(Clone)]
pub struct BreedService {
    breeds: Arc<dyn BreedStore>,
}

impl BreedService {
    pub fn new(breeds: Arc<dyn BreedStore>) -> Self {
        Self { breeds }
    }

    /// Insert a breed keyed by its catalog id. Repeating the call is a no-op.
    pub async fn upsert(&self, catalog_id: &str, name: &str) -> ServiceResult<Breed> {
        let input = CreateBreed {
            catalog_id: require_text("catalog id", catalog_id)?,
            name: require_text("breed name", name)?,
        };
        Ok(self.breeds.upsert(&input).await?)
    }

    pub async fn list(&self) -> ServiceResult<Vec<Breed>> {
        Ok(self.breeds.list().await?)
    }

    /// Case-insensitive lookup by display name.
    pub async fn find_by_name(&self, name: &str) -> ServiceResult<Breed> {
        let name = require_text("breed", name)?;
        self.breeds
            .find_by_name(&name)
            .await?
            .ok_or(CoreError::NotFoundByName { entity: "Breed", name }.into())
    }
}
