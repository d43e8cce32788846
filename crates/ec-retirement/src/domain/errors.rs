//! Error types for the retirement engine

use std::fmt::Debug;
use thiserror::Error;

/// Caller-contract violations surfaced by the engine.
///
/// None of these are transient: every variant indicates a bug in the calling
/// pipeline, detected synchronously and before any shared state was mutated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RetirementError<M: Debug> {
    /// A completion token was registered twice
    #[error("completion token already registered: {0:?}")]
    AlreadyRegistered(M),

    /// The token is not (or no longer) known to the engine
    #[error("completion token not registered: {0:?}")]
    Unregistered(M),

    /// Completion was reported twice for the same token
    #[error("completion already reported for token: {0:?}")]
    AlreadyCompleted(M),

    /// Gate redirection attempted after the origin already fired
    #[error("cannot defer retirement of {0:?}: completion already reported")]
    DeferAfterCompletion(M),

    /// Gate redirection attempted twice on the same origin
    #[error("retirement of {0:?} already deferred")]
    AlreadyDeferred(M),

    /// Live-record cap exceeded (anti-resource-exhaustion guard)
    #[error("pending backlog exceeded: {pending} >= {max}")]
    BacklogExceeded { pending: usize, max: usize },
}
