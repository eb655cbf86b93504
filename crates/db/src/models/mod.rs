//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//!   (or an aggregate assembled from several rows)
//! - A `Deserialize` create DTO for inserts

pub mod breed;
pub mod mission;
pub mod spy_cat;
pub mod target;
