//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Lookups return `Option`;
//! a missing row is never an error.

pub mod breed_repo;
pub mod mission_repo;
pub mod spy_cat_repo;
pub mod target_repo;

pub use breed_repo::BreedRepo;
pub use mission_repo::MissionRepo;
pub use spy_cat_repo::SpyCatRepo;
pub use target_repo::TargetRepo;
