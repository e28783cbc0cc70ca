//! Restricting an advancor to one player's prompts.

use crate::core::PlayerId;
use crate::protocol::Message;

use super::{Advancor, PolicyResult};

/// Applies `inner` only to prompts addressed to one player.
#[derive(Clone, Debug)]
pub struct PlayerViewAdvancor<A> {
    player: PlayerId,
    inner: A,
}

impl<A: Advancor> PlayerViewAdvancor<A> {
    pub fn new(player: PlayerId, inner: A) -> Self {
        Self { player, inner }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }
}

impl<A: Advancor> Advancor for PlayerViewAdvancor<A> {
    fn advance(&mut self, msg: &Message) -> PolicyResult {
        if msg.response_player() == Some(self.player) {
            self.inner.advance(msg)
        } else {
            PolicyResult::Deferred
        }
    }
}
