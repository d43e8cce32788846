//! Core entities for the retirement engine

use super::errors::RetirementError;
use super::value_objects::{Gate, LaneId, RetirementStats};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

/// One registered, not-yet-retired operation.
///
/// Retirement is represented by removal: a retired record leaves the ledger
/// entirely, so no terminal flag lingers on live records.
#[derive(Clone, Debug)]
pub struct OperationRecord<R, M> {
    /// Externally-visible unit released on retirement (opaque to the engine)
    pub handle: R,
    /// Completion identity, unique per registration
    pub token: M,
    /// Execution lane; same-lane records retire in registration order
    pub lane: LaneId,
    /// Global registration sequence, used as a deterministic tie-break
    pub seq: u64,
    /// Set exactly once, when completion is reported for `token`
    pub fired: bool,
    /// Retirement eligibility condition
    pub gate: Gate<M>,
}

/// The engine's authoritative state: token-keyed records, per-lane FIFO
/// queues, the append-only fired-token set, and the gate-waiter index.
///
/// Lane queues and the waiter index store tokens only; the record map owns
/// the records. All three structures are mutated together, under the single
/// exclusive-access scope the application service provides.
#[derive(Debug)]
pub struct RetirementLedger<R, M> {
    records: HashMap<M, OperationRecord<R, M>>,
    lanes: HashMap<LaneId, VecDeque<M>>,
    /// Every token ever reported complete, kept independent of retirement.
    /// Sole input to gate evaluation.
    fired: HashSet<M>,
    /// target token -> origins whose gate was redirected onto it
    waiters: HashMap<M, Vec<M>>,
    next_seq: u64,
    registered: u64,
    completed: u64,
    retired: u64,
}

impl<R, M> RetirementLedger<R, M>
where
    M: Clone + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            lanes: HashMap::new(),
            fired: HashSet::new(),
            waiters: HashMap::new(),
            next_seq: 0,
            registered: 0,
            completed: 0,
            retired: 0,
        }
    }

    /// Register an operation at the tail of its lane.
    ///
    /// The token must be fresh: never registered before, not even for an
    /// operation that has since retired. A token previously named only as a
    /// defer *target* is still fresh.
    pub fn register(&mut self, handle: R, token: M, lane: LaneId) -> Result<(), RetirementError<M>> {
        if self.records.contains_key(&token) || self.fired.contains(&token) {
            return Err(RetirementError::AlreadyRegistered(token));
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        self.records.insert(
            token.clone(),
            OperationRecord {
                handle,
                token: token.clone(),
                lane,
                seq,
                fired: false,
                gate: Gate::SelfCompletion,
            },
        );
        self.lanes.entry(lane).or_default().push_back(token);
        self.registered += 1;

        Ok(())
    }

    /// Redirect `origin`'s retirement gate onto `target`.
    ///
    /// `origin` must be registered, unfired, and still self-gated. `target`
    /// need not be registered yet; defer targets may be declared before the
    /// corresponding operation exists.
    pub fn defer_retirement(&mut self, origin: M, target: M) -> Result<(), RetirementError<M>> {
        let record = match self.records.get_mut(&origin) {
            Some(record) => record,
            None if self.fired.contains(&origin) => {
                return Err(RetirementError::DeferAfterCompletion(origin));
            }
            None => return Err(RetirementError::Unregistered(origin)),
        };

        if record.fired {
            return Err(RetirementError::DeferAfterCompletion(origin));
        }
        if record.gate.is_deferred() {
            return Err(RetirementError::AlreadyDeferred(origin));
        }

        record.gate = Gate::DeferredTo(target.clone());
        self.waiters.entry(target).or_default().push(origin);

        Ok(())
    }

    /// Record the completion of `token`. Fails on a duplicate report or an
    /// unregistered token, before any state changes.
    pub fn mark_fired(&mut self, token: &M) -> Result<LaneId, RetirementError<M>> {
        if self.fired.contains(token) {
            return Err(RetirementError::AlreadyCompleted(token.clone()));
        }
        let record = match self.records.get_mut(token) {
            Some(record) => record,
            None => return Err(RetirementError::Unregistered(token.clone())),
        };

        record.fired = true;
        let lane = record.lane;
        self.fired.insert(token.clone());
        self.completed += 1;

        Ok(lane)
    }

    /// Whether the lane's head record is eligible to retire right now.
    pub fn head_is_ready(&self, lane: LaneId) -> bool {
        let Some(queue) = self.lanes.get(&lane) else {
            return false;
        };
        let Some(head) = queue.front() else {
            return false;
        };
        match self.records.get(head) {
            Some(record) => record.fired && record.gate.is_open(&self.fired),
            None => false,
        }
    }

    /// Retire the lane's head record, returning its handle. The record
    /// leaves the record map and the queue; an emptied lane is dropped.
    pub fn retire_head(&mut self, lane: LaneId) -> Option<R> {
        let queue = self.lanes.get_mut(&lane)?;
        let head = queue.pop_front()?;
        if queue.is_empty() {
            self.lanes.remove(&lane);
        }

        let record = self.records.remove(&head)?;
        self.retired += 1;
        Some(record.handle)
    }

    /// Drain the waiter list for a just-fired target, in registration order,
    /// keeping only origins still awaiting retirement.
    pub fn take_waiters(&mut self, target: &M) -> Vec<M> {
        let Some(origins) = self.waiters.remove(target) else {
            return Vec::new();
        };

        let mut live: Vec<M> = origins
            .into_iter()
            .filter(|origin| self.records.contains_key(origin))
            .collect();
        live.sort_by_key(|origin| self.records[origin].seq);
        live
    }

    pub fn record(&self, token: &M) -> Option<&OperationRecord<R, M>> {
        self.records.get(token)
    }

    pub fn has_fired(&self, token: &M) -> bool {
        self.fired.contains(token)
    }

    /// True iff no unretired record remains. The surrounding server uses
    /// this as the precondition for entity teardown.
    pub fn is_quiescent(&self) -> bool {
        self.records.is_empty()
    }

    /// Records currently awaiting retirement, across all lanes.
    pub fn pending_count(&self) -> usize {
        self.records.len()
    }

    /// Queue depth for one lane (0 for an unknown or drained lane).
    pub fn lane_depth(&self, lane: LaneId) -> usize {
        self.lanes.get(&lane).map(VecDeque::len).unwrap_or(0)
    }

    pub fn stats(&self) -> RetirementStats {
        RetirementStats {
            registered: self.registered,
            completed: self.completed,
            retired: self.retired,
            pending: self.records.len(),
            deferred: self
                .records
                .values()
                .filter(|record| record.gate.is_deferred())
                .count(),
            lanes: self.lanes.len(),
        }
    }
}

impl<R, M> Default for RetirementLedger<R, M>
where
    M: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
