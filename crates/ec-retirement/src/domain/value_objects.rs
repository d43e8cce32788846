//! Value objects for the retirement engine

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// Execution-partition identifier. Opaque to the engine; operations sharing
/// a lane retire in strict registration order.
pub type LaneId = i64;

/// Retirement gate for a registered operation.
///
/// Every record starts self-gated: it becomes eligible as soon as its own
/// completion is reported. A gate may be redirected once, before the record
/// fires, onto another completion token; the record is then eligible only
/// once a completion has been reported for that token, regardless of whether
/// the other operation has itself retired.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gate<M> {
    /// Eligible on the record's own completion
    SelfCompletion,
    /// Eligible once the named token has fired
    DeferredTo(M),
}

impl<M: Eq + Hash> Gate<M> {
    /// Whether this gate is open given the set of tokens that have fired.
    ///
    /// The record's own firing is checked separately; this only evaluates
    /// the redirection, against the append-only fired-token set.
    pub fn is_open(&self, fired: &HashSet<M>) -> bool {
        match self {
            Gate::SelfCompletion => true,
            Gate::DeferredTo(target) => fired.contains(target),
        }
    }

    /// Whether the gate has been redirected away from the default.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Gate::DeferredTo(_))
    }
}

/// Engine counters for observability.
///
/// `registered`, `completed` and `retired` are monotonic; the rest reflect
/// the state at the moment of the snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetirementStats {
    /// Total operations ever registered
    pub registered: u64,
    /// Total completion reports accepted
    pub completed: u64,
    /// Total operations retired
    pub retired: u64,
    /// Records currently awaiting retirement
    pub pending: usize,
    /// Pending records whose gate has been redirected
    pub deferred: usize,
    /// Lanes with at least one pending record
    pub lanes: usize,
}
