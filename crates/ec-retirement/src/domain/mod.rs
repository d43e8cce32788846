//! Domain layer for the retirement engine

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;
