//! Ports for the retirement engine

pub mod inbound;
