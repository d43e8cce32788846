//! Domain invariants for the retirement engine
//!
//! Executable checkers over a recorded run: the registration log, the
//! installed gate redirections, the firing order, and the batch each firing
//! produced. Used by the randomized tests to validate whole schedules.

use super::value_objects::LaneId;
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// INVARIANT: Per-lane FIFO.
/// Within each lane, retirements happen in exactly registration order.
pub fn invariant_lane_fifo<M>(registrations: &[(M, LaneId)], retired: &[M]) -> bool
where
    M: Clone + Eq + Hash,
{
    let lane_of: HashMap<&M, LaneId> = registrations
        .iter()
        .map(|(token, lane)| (token, *lane))
        .collect();

    let mut expected: HashMap<LaneId, VecDeque<&M>> = HashMap::new();
    for (token, lane) in registrations {
        expected.entry(*lane).or_default().push_back(token);
    }

    for token in retired {
        let Some(lane) = lane_of.get(token) else {
            return false; // Retired something never registered
        };
        match expected.get_mut(lane).and_then(VecDeque::pop_front) {
            Some(front) if front == token => {}
            _ => return false,
        }
    }

    true
}

/// INVARIANT: Exactly-once emission.
/// No handle appears twice across all result batches.
pub fn invariant_exactly_once<M: Eq + Hash>(retired: &[M]) -> bool {
    let mut seen = HashSet::new();
    retired.iter().all(|token| seen.insert(token))
}

/// INVARIANT: Gates respected.
/// A record retires no earlier than the call that fires its own token, and,
/// if redirected, no earlier than the call that fires its gate target.
///
/// `batches[k]` is the batch returned by firing `fired_order[k]`.
pub fn invariant_gates_respected<M>(
    defers: &[(M, M)],
    fired_order: &[M],
    batches: &[Vec<M>],
) -> bool
where
    M: Clone + Eq + Hash,
{
    let fire_pos: HashMap<&M, usize> = fired_order
        .iter()
        .enumerate()
        .map(|(pos, token)| (token, pos))
        .collect();
    let target_of: HashMap<&M, &M> = defers
        .iter()
        .map(|(origin, target)| (origin, target))
        .collect();

    for (call, batch) in batches.iter().enumerate() {
        for token in batch {
            match fire_pos.get(token) {
                Some(own) if *own <= call => {}
                _ => return false, // Retired before (or without) its own firing
            }
            if let Some(target) = target_of.get(token) {
                match fire_pos.get(*target) {
                    Some(gate) if *gate <= call => {}
                    _ => return false, // Retired before its gate target fired
                }
            }
        }
    }

    true
}
