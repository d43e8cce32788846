//! # EC-Retirement: Completion-Ordering Engine
//!
//! Dependency-ordered retirement gating for a clustered entity server.
//! Operations execute concurrently across independent lanes; this crate
//! decides the exact order in which completed operations may be retired
//! (acknowledged/released downstream).
//!
//! ## Architecture
//!
//! - **Domain**: Core entities (OperationRecord, RetirementLedger) and the
//!   Gate value object
//! - **Algorithms**: The completion cascade (per-lane FIFO draining plus
//!   cross-lane defer-chain resolution)
//! - **Ports**: Inbound (RetirementApi)
//! - **Application**: Service wrapping the ledger behind a single
//!   exclusive-access scope
//!
//! ## Guarantees
//!
//! - Operations sharing a lane retire in strict registration order
//! - A record gated on another operation retires only once that operation's
//!   completion has been reported, however many redirection hops are chained
//! - Every record is retired exactly once; each completion report returns
//!   the full batch it unblocked, in resolution order

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::service::RetirementService;
pub use config::RetirementConfig;
pub use domain::entities::{OperationRecord, RetirementLedger};
pub use domain::errors::RetirementError;
pub use domain::value_objects::{Gate, LaneId, RetirementStats};
pub use ports::inbound::RetirementApi;
