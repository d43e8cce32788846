//! Inbound Ports (Driving Ports / API)

use crate::domain::errors::RetirementError;
use crate::domain::value_objects::{LaneId, RetirementStats};
use async_trait::async_trait;
use std::fmt::Debug;

/// Primary retirement-ordering API.
///
/// The caller is the entity-execution pipeline: it decides lanes, issues
/// completion reports, and consumes the ordered retirement batches to
/// release acknowledgments or replication watermarks. Handles, tokens, and
/// lanes are opaque here; the engine only compares tokens for equality.
///
/// All methods serialize against one exclusive-access scope; no method
/// suspends or performs I/O while holding it.
#[async_trait]
pub trait RetirementApi<R, M: Debug>: Send + Sync {
    /// Register an operation at the tail of its lane.
    ///
    /// The token must be fresh. Registering a token that an earlier gate
    /// redirection already names as its *target* is valid and expected.
    async fn register(&self, handle: R, token: M, lane: LaneId) -> Result<(), RetirementError<M>>;

    /// Redirect an operation's retirement gate onto a later operation's
    /// completion. Valid only while the origin is registered, unfired, and
    /// still self-gated; the target need not exist yet.
    async fn defer_retirement(&self, origin: M, target: M) -> Result<(), RetirementError<M>>;

    /// Report that an operation finished executing.
    ///
    /// Returns every handle that became retireable as a direct or indirect
    /// consequence, in retirement order. The batch may be empty, may contain
    /// only other operations' handles, or may span several lanes.
    async fn retire_for_completion(&self, token: M) -> Result<Vec<R>, RetirementError<M>>;

    /// True iff no unretired record remains (teardown precondition).
    async fn is_quiescent(&self) -> bool;

    /// Records currently awaiting retirement.
    async fn pending_count(&self) -> usize;

    /// Queue depth for one lane.
    async fn lane_depth(&self, lane: LaneId) -> usize;

    /// Counter snapshot for observability.
    async fn stats(&self) -> RetirementStats;
}
