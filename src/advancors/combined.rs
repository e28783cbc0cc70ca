//! Sequential first-match composition.

use crate::protocol::Message;

use super::{Advancor, PolicyResult};

/// Tries each advancor in order and returns the first answer.
///
/// Specialized handlers go first, general fallbacks last. Defers only when
/// every member defers.
#[derive(Default)]
pub struct CombinedAdvancor<'a> {
    advancors: Vec<Box<dyn Advancor + 'a>>,
}

impl<'a> CombinedAdvancor<'a> {
    /// Create an empty combination (always defers).
    pub fn new() -> Self {
        Self { advancors: Vec::new() }
    }

    /// Append an advancor at the lowest priority (builder pattern).
    pub fn with(mut self, advancor: impl Advancor + 'a) -> Self {
        self.push(advancor);
        self
    }

    /// Append an advancor at the lowest priority.
    pub fn push(&mut self, advancor: impl Advancor + 'a) {
        self.advancors.push(Box::new(advancor));
    }

    pub fn len(&self) -> usize {
        self.advancors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.advancors.is_empty()
    }
}

impl<'a> From<Vec<Box<dyn Advancor + 'a>>> for CombinedAdvancor<'a> {
    fn from(advancors: Vec<Box<dyn Advancor + 'a>>) -> Self {
        Self { advancors }
    }
}

impl Advancor for CombinedAdvancor<'_> {
    fn advance(&mut self, msg: &Message) -> PolicyResult {
        for advancor in &mut self.advancors {
            if let PolicyResult::Responded(response) = advancor.advance(msg) {
                return PolicyResult::Responded(response);
            }
        }
        PolicyResult::Deferred
    }
}

impl std::fmt::Debug for CombinedAdvancor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedAdvancor")
            .field("len", &self.advancors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advancors::{advancor_fn, AdvancorExt};
    use crate::core::PlayerId;
    use crate::protocol::{Response, SelectYesNoMsg};

    fn msg() -> Message {
        Message::SelectYesNo(SelectYesNoMsg {
            player: PlayerId::FIRST,
            desc: 0,
        })
    }

    #[test]
    fn test_first_answer_wins() {
        let mut second_calls = 0;
        {
            let mut combined = CombinedAdvancor::new()
                .with(advancor_fn(|_: &Message| None::<Response>))
                .with(advancor_fn(|_: &Message| Response::from_i32(7)))
                .with(advancor_fn(|_: &Message| {
                    second_calls += 1;
                    Response::from_i32(9)
                }));

            assert_eq!(combined.advance(&msg()).into_response(), Some(Response::from_i32(7)));
        }
        // Later members are never consulted once one answers
        assert_eq!(second_calls, 0);
    }

    #[test]
    fn test_all_defer() {
        let mut empty = CombinedAdvancor::new();
        assert!(empty.advance(&msg()).is_deferred());

        let mut deferring = advancor_fn(|_: &Message| None::<Response>)
            .or(advancor_fn(|_: &Message| PolicyResult::Deferred));
        assert!(deferring.advance(&msg()).is_deferred());
        assert_eq!(deferring.len(), 2);
    }
}
