//! In-memory stores mirroring the guarded writes of the PostgreSQL repositories.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use spycat_core::mission::{MAX_TARGETS, MIN_TARGETS};
use spycat_core::types::DbId;
use spycat_db::models::breed::{Breed, CreateBreed};
use spycat_db::models::mission::{CreateMission, Mission};
use spycat_db::models::spy_cat::{CreateSpyCat, SpyCat};
use spycat_db::models::target::{CreateTarget, Target, TargetInsert, TargetRemoval};
use uuid::Uuid;

use crate::store::{BreedStore, MissionStore, SpyCatStore, StoreResult, Stores, TargetStore};
use crate::Services;

#[derive(Default)]
struct State {
    breeds: Vec<Breed>,
    cats: Vec<SpyCat>,
    missions: Vec<Mission>,
}

impl State {
    fn mission_mut(&mut self, id: DbId) -> Option<&mut Mission> {
        self.missions.iter_mut().find(|m| m.id == id)
    }

    fn target_mut(&mut self, id: DbId) -> Option<(&mut Target, bool)> {
        self.missions.iter_mut().find_map(|m| {
            let completed = m.completed;
            m.targets
                .iter_mut()
                .find(|t| t.id == id)
                .map(|t| (t, completed))
        })
    }
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    state: Mutex<State>,
    failing: AtomicBool,
}

impl MemoryStore {
    /// Make every subsequent call fail as if the pool were exhausted.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn mission_count(&self) -> usize {
        self.state.lock().unwrap().missions.len()
    }

    pub fn target_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.missions.iter().map(|m| m.targets.len()).sum()
    }

    fn state(&self) -> StoreResult<MutexGuard<'_, State>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(self.state.lock().unwrap())
    }
}

fn new_target(mission_id: DbId, position: i32, input: &CreateTarget) -> Target {
    let now = Utc::now();
    Target {
        id: Uuid::new_v4(),
        mission_id,
        position,
        name: input.name.clone(),
        country: input.country.clone(),
        notes: input.notes.clone().unwrap_or_default(),
        completed: false,
        created_at: now,
        updated_at: now,
    }
}

/// Services over a fresh in-memory store seeded with the "Siamese" breed.
pub(crate) async fn seeded() -> (Arc<MemoryStore>, Services) {
    let store = Arc::new(MemoryStore::default());
    let services = Services::new(Stores {
        breeds: store.clone(),
        cats: store.clone(),
        missions: store.clone(),
        targets: store.clone(),
    });
    services.breeds.upsert("siam", "Siamese").await.unwrap();
    (store, services)
}

#[async_trait]
impl BreedStore for MemoryStore {
    async fn upsert(&self, input: &CreateBreed) -> StoreResult<Breed> {
        let mut state = self.state()?;
        if let Some(existing) = state.breeds.iter().find(|b| b.catalog_id == input.catalog_id) {
            return Ok(existing.clone());
        }
        let breed = Breed {
            id: Uuid::new_v4(),
            catalog_id: input.catalog_id.clone(),
            name: input.name.clone(),
            created_at: Utc::now(),
        };
        state.breeds.push(breed.clone());
        Ok(breed)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Breed>> {
        let wanted = name.trim().to_lowercase();
        let state = self.state()?;
        Ok(state
            .breeds
            .iter()
            .find(|b| b.name.to_lowercase() == wanted)
            .cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Breed>> {
        let mut breeds = self.state()?.breeds.clone();
        breeds.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(breeds)
    }
}

#[async_trait]
impl SpyCatStore for MemoryStore {
    async fn create(&self, input: &CreateSpyCat) -> StoreResult<SpyCat> {
        let mut state = self.state()?;
        let breed = state
            .breeds
            .iter()
            .find(|b| b.id == input.breed_id)
            .cloned()
            .ok_or(sqlx::Error::RowNotFound)?;
        let now = Utc::now();
        let cat = SpyCat {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            breed,
            years_experience: input.years_experience,
            salary: input.salary,
            created_at: now,
            updated_at: now,
        };
        state.cats.push(cat.clone());
        Ok(cat)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<SpyCat>> {
        Ok(self.state()?.cats.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<SpyCat>> {
        Ok(self.state()?.cats.clone())
    }

    async fn update_salary(&self, id: DbId, salary: f64) -> StoreResult<Option<SpyCat>> {
        let mut state = self.state()?;
        Ok(state.cats.iter_mut().find(|c| c.id == id).map(|c| {
            c.salary = salary;
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn update_experience(&self, id: DbId, years: i32) -> StoreResult<Option<SpyCat>> {
        let mut state = self.state()?;
        Ok(state.cats.iter_mut().find(|c| c.id == id).map(|c| {
            c.years_experience = years;
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn delete_unless_on_active_mission(&self, id: DbId) -> StoreResult<bool> {
        let mut state = self.state()?;
        let busy = state
            .missions
            .iter()
            .any(|m| m.assigned_cat_id == Some(id) && !m.completed);
        let before = state.cats.len();
        if busy {
            return Ok(false);
        }
        state.cats.retain(|c| c.id != id);
        if state.cats.len() == before {
            return Ok(false);
        }
        for mission in &mut state.missions {
            if mission.assigned_cat_id == Some(id) {
                mission.assigned_cat_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl MissionStore for MemoryStore {
    async fn create(
        &self,
        input: &CreateMission,
        targets: &[CreateTarget],
    ) -> StoreResult<Mission> {
        let mut state = self.state()?;
        let id = Uuid::new_v4();
        let now = Utc::now();
        let mission = Mission {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            assigned_cat_id: input.assigned_cat_id,
            completed: false,
            targets: targets
                .iter()
                .enumerate()
                .map(|(i, t)| new_target(id, i as i32, t))
                .collect(),
            created_at: now,
            updated_at: now,
        };
        state.missions.push(mission.clone());
        Ok(mission)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Mission>> {
        Ok(self.state()?.missions.iter().find(|m| m.id == id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Mission>> {
        Ok(self.state()?.missions.iter().rev().cloned().collect())
    }

    async fn update_completed(&self, id: DbId, completed: bool) -> StoreResult<Option<Mission>> {
        let mut state = self.state()?;
        Ok(state.mission_mut(id).map(|m| {
            m.completed = completed;
            m.clone()
        }))
    }

    async fn update_assigned_cat(
        &self,
        id: DbId,
        cat_id: Option<DbId>,
    ) -> StoreResult<Option<Mission>> {
        let mut state = self.state()?;
        Ok(state
            .mission_mut(id)
            .filter(|m| !m.completed)
            .map(|m| {
                m.assigned_cat_id = cat_id;
                m.clone()
            }))
    }

    async fn delete_if_all_targets_completed(&self, id: DbId) -> StoreResult<bool> {
        let mut state = self.state()?;
        let deletable = state
            .missions
            .iter()
            .any(|m| m.id == id && m.incomplete_targets() == 0);
        if deletable {
            state.missions.retain(|m| m.id != id);
        }
        Ok(deletable)
    }

    async fn find_active_for_cat(&self, cat_id: DbId) -> StoreResult<Option<DbId>> {
        Ok(self
            .state()?
            .missions
            .iter()
            .find(|m| m.assigned_cat_id == Some(cat_id) && !m.completed)
            .map(|m| m.id))
    }
}

#[async_trait]
impl TargetStore for MemoryStore {
    async fn create(&self, mission_id: DbId, input: &CreateTarget) -> StoreResult<TargetInsert> {
        let mut state = self.state()?;
        let Some(mission) = state.mission_mut(mission_id) else {
            return Ok(TargetInsert::MissionMissing);
        };
        if mission.completed {
            return Ok(TargetInsert::MissionCompleted);
        }
        if mission.targets.len() >= MAX_TARGETS {
            return Ok(TargetInsert::LimitReached);
        }
        let position = mission.targets.iter().map(|t| t.position + 1).max().unwrap_or(0);
        let target = new_target(mission_id, position, input);
        mission.targets.push(target.clone());
        Ok(TargetInsert::Created(target))
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Target>> {
        let mut state = self.state()?;
        Ok(state.target_mut(id).map(|(t, _)| t.clone()))
    }

    async fn update_completed(&self, id: DbId, completed: bool) -> StoreResult<Option<Target>> {
        let mut state = self.state()?;
        Ok(state.target_mut(id).map(|(t, _)| {
            t.completed = completed;
            t.clone()
        }))
    }

    async fn update_notes(&self, id: DbId, notes: &str) -> StoreResult<Option<Target>> {
        let mut state = self.state()?;
        Ok(state
            .target_mut(id)
            .filter(|(t, mission_completed)| !t.completed && !*mission_completed)
            .map(|(t, _)| {
                t.notes = notes.to_string();
                t.clone()
            }))
    }

    async fn delete(&self, id: DbId) -> StoreResult<TargetRemoval> {
        let mut state = self.state()?;
        let Some(mission) = state
            .missions
            .iter_mut()
            .find(|m| m.targets.iter().any(|t| t.id == id))
        else {
            return Ok(TargetRemoval::Missing);
        };
        if mission.targets.len() <= MIN_TARGETS {
            return Ok(TargetRemoval::LastTarget);
        }
        mission.targets.retain(|t| t.id != id);
        Ok(TargetRemoval::Deleted)
    }
}
