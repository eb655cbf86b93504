//! Store traits consumed by the rule layer, one per entity.
//!
//! Services depend only on these traits; [`Stores::postgres`] wires them to
//! the repository layer, and tests can substitute in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;
use spycat_core::types::DbId;
use spycat_db::models::breed::{Breed, CreateBreed};
use spycat_db::models::mission::{CreateMission, Mission};
use spycat_db::models::spy_cat::{CreateSpyCat, SpyCat};
use spycat_db::models::target::{CreateTarget, Target, TargetInsert, TargetRemoval};
use spycat_db::repositories::{BreedRepo, MissionRepo, SpyCatRepo, TargetRepo};
use spycat_db::DbPool;

/// Result type returned by every store method.
pub type StoreResult<T> = Result<T, sqlx::Error>;

#[async_trait]
pub trait BreedStore: Send + Sync {
    /// Insert a breed or return the existing row for its catalog id.
    async fn upsert(&self, input: &CreateBreed) -> StoreResult<Breed>;
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Breed>>;
    async fn list(&self) -> StoreResult<Vec<Breed>>;
}

#[async_trait]
pub trait SpyCatStore: Send + Sync {
    async fn create(&self, input: &CreateSpyCat) -> StoreResult<SpyCat>;
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<SpyCat>>;
    async fn list(&self) -> StoreResult<Vec<SpyCat>>;
    async fn update_salary(&self, id: DbId, salary: f64) -> StoreResult<Option<SpyCat>>;
    async fn update_experience(&self, id: DbId, years: i32) -> StoreResult<Option<SpyCat>>;
    /// Returns `false` when the cat is missing or on an incomplete mission.
    async fn delete_unless_on_active_mission(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait MissionStore: Send + Sync {
    /// Persist a mission and all of its targets atomically.
    async fn create(&self, input: &CreateMission, targets: &[CreateTarget])
        -> StoreResult<Mission>;
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Mission>>;
    async fn list(&self) -> StoreResult<Vec<Mission>>;
    async fn update_completed(&self, id: DbId, completed: bool) -> StoreResult<Option<Mission>>;
    /// Returns `None` when the mission is missing or already completed.
    async fn update_assigned_cat(
        &self,
        id: DbId,
        cat_id: Option<DbId>,
    ) -> StoreResult<Option<Mission>>;
    /// Returns `false` when the mission is missing or has incomplete targets.
    async fn delete_if_all_targets_completed(&self, id: DbId) -> StoreResult<bool>;
    async fn find_active_for_cat(&self, cat_id: DbId) -> StoreResult<Option<DbId>>;
}

#[async_trait]
pub trait TargetStore: Send + Sync {
    async fn create(&self, mission_id: DbId, input: &CreateTarget) -> StoreResult<TargetInsert>;
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Target>>;
    async fn update_completed(&self, id: DbId, completed: bool) -> StoreResult<Option<Target>>;
    /// Returns `None` when the target is missing or it or its mission is completed.
    async fn update_notes(&self, id: DbId, notes: &str) -> StoreResult<Option<Target>>;
    async fn delete(&self, id: DbId) -> StoreResult<TargetRemoval>;
}

/// The set of stores a [`crate::Services`] facade is built from.
#[derive(Clone)]
pub struct Stores {
    pub breeds: Arc<dyn BreedStore>,
    pub cats: Arc<dyn SpyCatStore>,
    pub missions: Arc<dyn MissionStore>,
    pub targets: Arc<dyn TargetStore>,
}

impl Stores {
    /// Wire every store to the PostgreSQL repositories.
    pub fn postgres(pool: DbPool) -> Self {
        let store = Arc::new(PgStore { pool });
        Self {
            breeds: store.clone(),
            cats: store.clone(),
            missions: store.clone(),
            targets: store,
        }
    }
}

/// PostgreSQL-backed implementation of every store trait.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

#[async_trait]
impl BreedStore for PgStore {
    async fn upsert(&self, input: &CreateBreed) -> StoreResult<Breed> {
        BreedRepo::create(&self.pool, input).await
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Breed>> {
        BreedRepo::find_by_name(&self.pool, name).await
    }

    async fn list(&self) -> StoreResult<Vec<Breed>> {
        BreedRepo::list(&self.pool).await
    }
}

#[async_trait]
impl SpyCatStore for PgStore {
    async fn create(&self, input: &CreateSpyCat) -> StoreResult<SpyCat> {
        SpyCatRepo::create(&self.pool, input).await
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<SpyCat>> {
        SpyCatRepo::find_by_id(&self.pool, id).await
    }

    async fn list(&self) -> StoreResult<Vec<SpyCat>> {
        SpyCatRepo::list(&self.pool).await
    }

    async fn update_salary(&self, id: DbId, salary: f64) -> StoreResult<Option<SpyCat>> {
        SpyCatRepo::update_salary(&self.pool, id, salary).await
    }

    async fn update_experience(&self, id: DbId, years: i32) -> StoreResult<Option<SpyCat>> {
        SpyCatRepo::update_experience(&self.pool, id, years).await
    }

    async fn delete_unless_on_active_mission(&self, id: DbId) -> StoreResult<bool> {
        SpyCatRepo::delete_unless_on_active_mission(&self.pool, id).await
    }
}

#[async_trait]
impl MissionStore for PgStore {
    async fn create(
        &self,
        input: &CreateMission,
        targets: &[CreateTarget],
    ) -> StoreResult<Mission> {
        MissionRepo::create(&self.pool, input, targets).await
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Mission>> {
        MissionRepo::find_by_id(&self.pool, id).await
    }

    async fn list(&self) -> StoreResult<Vec<Mission>> {
        MissionRepo::list(&self.pool).await
    }

    async fn update_completed(&self, id: DbId, completed: bool) -> StoreResult<Option<Mission>> {
        MissionRepo::update_completed(&self.pool, id, completed).await
    }

    async fn update_assigned_cat(
        &self,
        id: DbId,
        cat_id: Option<DbId>,
    ) -> StoreResult<Option<Mission>> {
        MissionRepo::update_assigned_cat(&self.pool, id, cat_id).await
    }

    async fn delete_if_all_targets_completed(&self, id: DbId) -> StoreResult<bool> {
        MissionRepo::delete_if_all_targets_completed(&self.pool, id).await
    }

    async fn find_active_for_cat(&self, cat_id: DbId) -> StoreResult<Option<DbId>> {
        MissionRepo::find_active_for_cat(&self.pool, cat_id).await
    }
}

#[async_trait]
impl TargetStore for PgStore {
    async fn create(&self, mission_id: DbId, input: &CreateTarget) -> StoreResult<TargetInsert> {
        TargetRepo::create(&self.pool, mission_id, input).await
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Target>> {
        TargetRepo::find_by_id(&self.pool, id).await
    }

    async fn update_completed(&self, id: DbId, completed: bool) -> StoreResult<Option<Target>> {
        TargetRepo::update_completed(&self.pool, id, completed).await
    }

    async fn update_notes(&self, id: DbId, notes: &str) -> StoreResult<Option<Target>> {
        TargetRepo::update_notes(&self.pool, id, notes).await
    }

    async fn delete(&self, id: DbId) -> StoreResult<TargetRemoval> {
        TargetRepo::delete(&self.pool, id).await
    }
}
