//! Cross-layer integration scenarios

pub mod concurrency;
