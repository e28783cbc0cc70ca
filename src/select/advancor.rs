//! Filter-driven card selection.

use tracing::debug;

use crate::advancors::{Advancor, PolicyResult};
use crate::core::Result;
use crate::protocol::{Message, Response};

use super::filter::{FilterQueue, SelectionFilter};
use super::pick::pick;
use super::sum;

/// Answers card selection prompts from a queue of filters.
///
/// Handles select card, tribute, unselect card and sum prompts. Filters
/// are consumed only when a prompt is actually answered, so one advancor
/// can steer a sequence of selections across several prompts. Anything
/// else, or a prompt the queue cannot satisfy, defers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectCardAdvancor {
    queue: FilterQueue,
}

impl SelectCardAdvancor {
    /// Create from filters in priority order.
    pub fn new<I>(filters: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SelectionFilter>,
    {
        Self {
            queue: filters.into_iter().collect(),
        }
    }

    /// Append a filter (builder pattern).
    pub fn with(mut self, filter: impl Into<SelectionFilter>) -> Self {
        self.queue.push(filter);
        self
    }

    /// Filters not yet consumed.
    pub fn queue(&self) -> &FilterQueue {
        &self.queue
    }

    fn answer(&self, msg: &Message) -> Option<(Result<Response>, Vec<usize>)> {
        match msg {
            Message::SelectCard(m) | Message::SelectTribute(m) => {
                let picked = pick(&self.queue, &m.cards, m.min as usize, m.max as usize)?;
                Some((m.prepare_response(&picked.indices), picked.consumed.to_vec()))
            }
            Message::SelectUnselectCard(m) => {
                let picked = pick(&self.queue, &m.selectable, 1, 1)?;
                let index = picked.indices.first().copied();
                Some((m.prepare_response(index), picked.consumed.to_vec()))
            }
            Message::SelectSum(m) => {
                let plan = sum::plan(m, &self.queue)?;
                Some((m.prepare_response(&plan.picks), plan.consumed))
            }
            _ => None,
        }
    }
}

impl Advancor for SelectCardAdvancor {
    fn advance(&mut self, msg: &Message) -> PolicyResult {
        match self.answer(msg) {
            Some((Ok(response), consumed)) => {
                self.queue.consume(&consumed);
                PolicyResult::Responded(response)
            }
            Some((Err(err), _)) => {
                debug!(kind = %msg.kind(), error = %err, "selection could not be encoded");
                PolicyResult::Deferred
            }
            None => {
                if matches!(
                    msg,
                    Message::SelectCard(_)
                        | Message::SelectTribute(_)
                        | Message::SelectUnselectCard(_)
                        | Message::SelectSum(_)
                ) {
                    debug!(kind = %msg.kind(), queued = self.queue.len(), "no selection satisfies the queued filters");
                }
                PolicyResult::Deferred
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardLocation, PlayerId};
    use crate::protocol::constants::{LOCATION_HAND, LOCATION_MZONE};
    use crate::protocol::{Candidate, SelectCardMsg, SelectSumMsg, SelectUnselectCardMsg};

    fn hand(codes: &[u32]) -> Vec<Candidate> {
        codes
            .iter()
            .enumerate()
            .map(|(i, &code)| {
                Candidate::new(code, CardLocation::new(PlayerId::FIRST, LOCATION_HAND, i as u32))
            })
            .collect()
    }

    fn select_one(codes: &[u32]) -> Message {
        Message::SelectCard(SelectCardMsg {
            player: PlayerId::FIRST,
            cancelable: false,
            min: 1,
            max: 1,
            cards: hand(codes),
        })
    }

    #[test]
    fn test_filters_consumed_across_prompts() {
        let mut policy = SelectCardAdvancor::new([20u32, 10]);

        let first = policy.advance(&select_one(&[10, 20, 30])).into_response();
        assert_eq!(first, Some(Response::from_bytes(&[1, 1])));
        assert_eq!(policy.queue().len(), 1);

        let second = policy.advance(&select_one(&[10, 20, 30])).into_response();
        assert_eq!(second, Some(Response::from_bytes(&[1, 0])));
        assert!(policy.queue().is_empty());

        assert!(policy.advance(&select_one(&[10, 20, 30])).is_deferred());
    }

    #[test]
    fn test_unsatisfiable_keeps_queue() {
        let mut policy = SelectCardAdvancor::new([99u32]);
        assert!(policy.advance(&select_one(&[10, 20])).is_deferred());
        assert_eq!(policy.queue().len(), 1);
    }

    #[test]
    fn test_unselect_card() {
        let mut policy = SelectCardAdvancor::default().with(SelectionFilter::code(30));
        let msg = Message::SelectUnselectCard(SelectUnselectCardMsg {
            player: PlayerId::FIRST,
            finishable: true,
            min: 1,
            max: 2,
            selectable: hand(&[10, 30]),
            ..SelectUnselectCardMsg::default()
        });

        assert_eq!(
            policy.advance(&msg).into_response(),
            Some(Response::from_bytes(&[1, 1]))
        );
        assert!(policy.queue().is_empty());
    }

    #[test]
    fn test_sum_commits_surviving_claims() {
        let cards = [3u32, 5, 2]
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                Candidate::new(100 + i as u32, CardLocation::new(PlayerId::FIRST, LOCATION_MZONE, i as u32))
                    .with_op_param(w)
            })
            .collect();
        let msg = Message::SelectSum(SelectSumMsg {
            player: PlayerId::FIRST,
            mode: 0,
            sum_val: 5,
            min: 1,
            max: 2,
            must_select: Vec::new(),
            cards,
        });

        let mut policy = SelectCardAdvancor::new([SelectionFilter::code(102), SelectionFilter::code(999)]);
        // Claim the 2, complete with the 3
        assert_eq!(
            policy.advance(&msg).into_response(),
            Some(Response::from_bytes(&[2, 2, 0]))
        );
        assert_eq!(policy.queue().len(), 1);
    }

    #[test]
    fn test_other_messages_defer() {
        let mut policy = SelectCardAdvancor::new([10u32]);
        assert!(policy.advance(&Message::Retry).is_deferred());
        assert_eq!(policy.queue().len(), 1);
    }
}
