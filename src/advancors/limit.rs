//! Cap on how many messages an advancor answers.

use crate::protocol::Message;

use super::{Advancor, PolicyResult};

/// Lets `inner` answer at most `limit` times.
///
/// Only answers count; calls where `inner` defers leave the budget intact.
/// Once spent, the limiter defers without consulting `inner`.
#[derive(Clone, Debug)]
pub struct LimitAdvancor<A> {
    inner: A,
    limit: usize,
    answered: usize,
}

impl<A: Advancor> LimitAdvancor<A> {
    pub fn new(inner: A, limit: usize) -> Self {
        Self {
            inner,
            limit,
            answered: 0,
        }
    }

    /// Limit of one.
    pub fn once(inner: A) -> Self {
        Self::new(inner, 1)
    }

    /// Answers left before the limiter goes quiet.
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.answered)
    }
}

impl<A: Advancor> Advancor for LimitAdvancor<A> {
    fn advance(&mut self, msg: &Message) -> PolicyResult {
        if self.answered >= self.limit {
            return PolicyResult::Deferred;
        }
        let result = self.inner.advance(msg);
        if result.is_responded() {
            self.answered += 1;
        }
        result
    }
}
