//! Fallback advancors built on each message's default response.

use crate::core::PlayerId;
use crate::protocol::{Message, MessageKind, Response};

use super::{Advancor, MapAdvancor, PolicyResult};

/// "Answer anything reasonably."
///
/// Optionally scoped to one responding player. Registered handlers get the
/// first say; when they have nothing, the message's own default response is
/// used.
#[derive(Debug, Default)]
pub struct DefaultAdvancor<'a> {
    player: Option<PlayerId>,
    handlers: MapAdvancor<'a>,
}

impl<'a> DefaultAdvancor<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only answer prompts addressed to `player` (builder pattern).
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    /// Override the default for one message kind (builder pattern).
    pub fn with_handler(
        mut self,
        kind: MessageKind,
        handler: impl FnMut(&Message) -> Option<Response> + 'a,
    ) -> Self {
        self.handlers.insert(kind, handler);
        self
    }
}

impl Advancor for DefaultAdvancor<'_> {
    fn advance(&mut self, msg: &Message) -> PolicyResult {
        if let Some(player) = self.player {
            if msg.response_player() != Some(player) {
                return PolicyResult::Deferred;
            }
        }
        self.handlers
            .advance(msg)
            .or_else(|| msg.default_response().into())
    }
}

/// Answers every message with its default response.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultResponseAdvancor;

impl Advancor for DefaultResponseAdvancor {
    fn advance(&mut self, msg: &Message) -> PolicyResult {
        msg.default_response().into()
    }
}
