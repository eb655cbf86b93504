//! Rule layer for the spy cat agency.
//!
//! Each service validates its inputs, checks the state-dependent rules
//! against the stores, and only then writes. Stores are injected through
//! [`store::Stores`] so the same rules run against PostgreSQL or a fake.

pub mod breed;
pub mod error;
pub mod mission;
pub mod spy_cat;
pub mod store;
pub mod target;

#[cfg(test)]
mod testing;

use spycat_db::DbPool;

pub use breed::BreedService;
pub use error::{ServiceError, ServiceResult};
pub use mission::MissionService;
pub use spy_cat::SpyCatService;
pub use store::Stores;
pub use target::TargetService;

/// Every service, built over one set of stores.
#[derive(Clone)]
pub struct Services {
    pub breeds: BreedService,
    pub cats: SpyCatService,
    pub missions: MissionService,
    pub targets: TargetService,
}

impl Services {
    pub fn new(stores: Stores) -> Self {
        Self {
            breeds: BreedService::new(stores.breeds.clone()),
            cats: SpyCatService::new(&stores),
            missions: MissionService::new(&stores),
            targets: TargetService::new(&stores),
        }
    }

    /// Services backed by the PostgreSQL repositories.
    pub fn postgres(pool: DbPool) -> Self {
        Self::new(Stores::postgres(pool))
    }
}
