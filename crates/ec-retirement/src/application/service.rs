//! Retirement Service
//!
//! Main service implementing RetirementApi. Owns the ledger behind a single
//! `tokio::sync::Mutex`, so the three mutating operations execute as atomic
//! read-modify-write transactions with respect to each other, as do the
//! inspection queries.

use crate::algorithms::retire_for_completion;
use crate::config::RetirementConfig;
use crate::domain::entities::RetirementLedger;
use crate::domain::errors::RetirementError;
use crate::domain::value_objects::{LaneId, RetirementStats};
use crate::ports::inbound::RetirementApi;
use async_trait::async_trait;
use std::fmt::Debug;
use std::hash::Hash;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Retirement Service
///
/// Serializes callers from a parallel execution pipeline (typically one
/// worker per lane) through one mutual-exclusion scope. The per-call cost is
/// proportional to the retirements the call actually produces, so a single
/// scope over the whole ledger is sufficient.
pub struct RetirementService<R, M> {
    ledger: Mutex<RetirementLedger<R, M>>,
    config: RetirementConfig,
}

impl<R, M> RetirementService<R, M>
where
    M: Clone + Eq + Hash + Debug,
{
    /// Create a new service with default config
    pub fn new() -> Self {
        Self::with_config(RetirementConfig::default())
    }

    /// Create a new service with custom config
    pub fn with_config(config: RetirementConfig) -> Self {
        Self {
            ledger: Mutex::new(RetirementLedger::new()),
            config,
        }
    }
}

impl<R, M> Default for RetirementService<R, M>
where
    M: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R, M> RetirementApi<R, M> for RetirementService<R, M>
where
    R: Send + 'static,
    M: Clone + Eq + Hash + Debug + Send + Sync + 'static,
{
    async fn register(&self, handle: R, token: M, lane: LaneId) -> Result<(), RetirementError<M>> {
        let mut ledger = self.ledger.lock().await;

        let pending = ledger.pending_count();
        if pending >= self.config.max_pending {
            return Err(RetirementError::BacklogExceeded {
                pending,
                max: self.config.max_pending,
            });
        }

        ledger.register(handle, token.clone(), lane)?;

        let depth = ledger.lane_depth(lane);
        if depth >= self.config.lane_backlog_warn {
            warn!(lane, depth, "lane backlog above configured threshold");
        }
        debug!(?token, lane, depth, "operation registered");

        Ok(())
    }

    async fn defer_retirement(&self, origin: M, target: M) -> Result<(), RetirementError<M>> {
        let mut ledger = self.ledger.lock().await;
        ledger.defer_retirement(origin.clone(), target.clone())?;
        debug!(?origin, ?target, "retirement deferred");
        Ok(())
    }

    async fn retire_for_completion(&self, token: M) -> Result<Vec<R>, RetirementError<M>> {
        let mut ledger = self.ledger.lock().await;
        let retired = retire_for_completion(&mut ledger, token.clone())?;
        debug!(
            ?token,
            retired = retired.len(),
            pending = ledger.pending_count(),
            "completion resolved"
        );
        Ok(retired)
    }

    async fn is_quiescent(&self) -> bool {
        self.ledger.lock().await.is_quiescent()
    }

    async fn pending_count(&self) -> usize {
        self.ledger.lock().await.pending_count()
    }

    async fn lane_depth(&self, lane: LaneId) -> usize {
        self.ledger.lock().await.lane_depth(lane)
    }

    async fn stats(&self) -> RetirementStats {
        self.ledger.lock().await.stats()
    }
}
