//! Application layer for the retirement engine

pub mod service;
