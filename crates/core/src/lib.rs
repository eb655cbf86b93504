//! Shared types, error taxonomy, and pure business rules for the spy cat
//! agency backend. Nothing in this crate performs I/O.

pub mod error;
pub mod mission;
pub mod spy_cat;
pub mod types;
