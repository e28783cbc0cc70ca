//! A fixed sequence of responses.

use std::collections::VecDeque;

use crate::protocol::{Message, Response};

use super::{Advancor, PolicyResult};

/// Replays a fixed list of responses, one per call, ignoring the message.
///
/// Used to reproduce a recorded run exactly. Defers forever once empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticAdvancor {
    responses: VecDeque<Response>,
}

impl StaticAdvancor {
    pub fn new<I>(responses: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Response>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
        }
    }

    /// Responses not yet replayed.
    pub fn remaining(&self) -> usize {
        self.responses.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.responses.is_empty()
    }
}

impl Advancor for StaticAdvancor {
    fn advance(&mut self, _msg: &Message) -> PolicyResult {
        self.responses.pop_front().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order_then_defers() {
        let a = Response::from_bytes(&[1, 0]);
        let b = Response::from_i32(-1);
        let mut policy = StaticAdvancor::new([a.clone(), b.clone()]);

        assert_eq!(policy.advance(&Message::Retry).into_response(), Some(a));
        assert_eq!(policy.advance(&Message::Retry).into_response(), Some(b));
        assert!(policy.is_exhausted());
        for _ in 0..3 {
            assert!(policy.advance(&Message::Retry).is_deferred());
        }
    }

    #[test]
    fn test_accepts_raw_buffers() {
        let policy = StaticAdvancor::new(vec![vec![0u8, 1], vec![2u8]]);
        assert_eq!(policy.remaining(), 2);
    }
}
