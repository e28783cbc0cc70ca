//! Plain bounded pick.
//!
//! Used for "select between min and max cards" prompts: every queued filter
//! gets one chance to claim a card, in queue order, until `max` cards are
//! held. Fewer than `min` claims means the prompt is unsatisfiable from the
//! queue alone.

use smallvec::SmallVec;

use crate::protocol::Located;

use super::filter::FilterQueue;

/// A tentative selection, not yet committed to the queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pick {
    /// Picked candidate indices, in filter order.
    pub indices: SmallVec<[usize; 8]>,
    /// Queue positions of the filters that produced the picks.
    pub consumed: SmallVec<[usize; 8]>,
}

/// Pick between `min` and `max` cards from `items` using the queue.
///
/// Returns `None` when fewer than `min` filters find a card. Call
/// `FilterQueue::consume(&pick.consumed)` once the answer is final.
pub fn pick<T: Located>(queue: &FilterQueue, items: &[T], min: usize, max: usize) -> Option<Pick> {
    let matches = queue.tentative_matches(items, max);
    if matches.len() < min {
        return None;
    }

    Some(Pick {
        indices: matches.iter().map(|m| m.item).collect(),
        consumed: matches.iter().map(|m| m.filter).collect(),
    })
}
