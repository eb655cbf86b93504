pub mod breed;
pub mod mission;
pub mod spy_cat;
pub mod target;
