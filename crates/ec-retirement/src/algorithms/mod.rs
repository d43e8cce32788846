//! Ordering algorithms for the retirement engine

pub mod cascade;

pub use cascade::retire_for_completion;
