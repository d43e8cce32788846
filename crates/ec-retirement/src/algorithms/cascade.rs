//! The completion cascade
//!
//! One completion report can unblock an arbitrary batch of retirements: the
//! fired record itself, records in other lanes whose gate was redirected onto
//! the fired token, and records behind any of those that were blocked purely
//! by FIFO order. The cascade resolves all of them in one step, touching only
//! the lanes it actually retires from; there is no global graph traversal.

use crate::domain::entities::RetirementLedger;
use crate::domain::errors::RetirementError;
use crate::domain::value_objects::LaneId;
use std::fmt::Debug;
use std::hash::Hash;

/// Report the completion of `token` and collect every operation that became
/// retireable as a direct or indirect consequence, in retirement order.
///
/// Resolution order: the fired record's own lane first, then the lane of
/// each record gated on `token`, in registration order. Within a lane,
/// records always leave head-first.
pub fn retire_for_completion<R, M>(
    ledger: &mut RetirementLedger<R, M>,
    token: M,
) -> Result<Vec<R>, RetirementError<M>>
where
    M: Clone + Eq + Hash + Debug,
{
    let lane = ledger.mark_fired(&token)?;

    let mut retired = Vec::new();
    drain_lane(ledger, lane, &mut retired);

    // Records in other lanes waiting on this token. A waiter may already
    // have left through an earlier drain of its own lane; take_waiters
    // filters those out.
    for origin in ledger.take_waiters(&token) {
        if let Some(record) = ledger.record(&origin) {
            let origin_lane = record.lane;
            drain_lane(ledger, origin_lane, &mut retired);
        }
    }

    Ok(retired)
}

/// Retire from the lane head for as long as the head is eligible.
///
/// A record that was already fired but blocked by FIFO order becomes
/// eligible the instant the record ahead of it retires, with no new firing
/// required; the loop picks those up until it meets an unready head or the
/// lane empties.
fn drain_lane<R, M>(ledger: &mut RetirementLedger<R, M>, lane: LaneId, retired: &mut Vec<R>)
where
    M: Clone + Eq + Hash + Debug,
{
    while ledger.head_is_ready(lane) {
        match ledger.retire_head(lane) {
            Some(handle) => retired.push(handle),
            None => break,
        }
    }
}
