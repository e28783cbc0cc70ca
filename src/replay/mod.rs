//! Recorded duels.
//!
//! A `ReplayLog` captures everything needed to reproduce a run: how the duel
//! was created, every card the scenario placed and how many responses had
//! been sent at that point, and every response sent to the engine, in order.
//! Replaying
//! feeds those responses back one by one without looking at the messages
//! they answer; checking that the live duel still matches the recording is
//! left to the scenario's checkpoints.

use serde::{Deserialize, Serialize};

use crate::core::{DuelSeed, PlayerInfo, PlayerPair, Result};
use crate::engine::NewCard;
use crate::protocol::Response;

/// A card placed by the scenario, and when.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedCard {
    pub card: NewCard,

    /// Responses sent before the card was placed. `None` for cards placed
    /// before the duel first ran.
    pub after_responses: Option<usize>,
}

impl PlacedCard {
    /// A card placed during setup.
    pub fn at_setup(card: NewCard) -> Self {
        Self {
            card,
            after_responses: None,
        }
    }

    /// A card placed mid-duel, once `responses` responses had been sent.
    pub fn after(card: NewCard, responses: usize) -> Self {
        Self {
            card,
            after_responses: Some(responses),
        }
    }
}

/// Setup and response trace of one duel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayLog {
    pub seed: DuelSeed,

    /// Duel rule flags.
    pub opt: u32,

    pub player_info: PlayerPair<PlayerInfo>,

    /// Cards placed by the scenario, in placement order.
    pub cards: Vec<PlacedCard>,

    /// Responses sent to the engine, in order.
    pub responses: Vec<Response>,
}

impl ReplayLog {
    /// Empty log for a duel created from `seed` with default setup.
    pub fn new(seed: DuelSeed) -> Self {
        Self {
            seed,
            opt: 0,
            player_info: PlayerPair::default(),
            cards: Vec::new(),
            responses: Vec::new(),
        }
    }

    pub fn with_opt(mut self, opt: u32) -> Self {
        self.opt = opt;
        self
    }

    pub fn with_player_info(mut self, player_info: PlayerPair<PlayerInfo>) -> Self {
        self.player_info = player_info;
        self
    }

    /// Cards placed during setup.
    pub fn with_cards(mut self, cards: Vec<NewCard>) -> Self {
        self.cards = cards.into_iter().map(PlacedCard::at_setup).collect();
        self
    }

    /// Add a card placed after `responses` responses (builder pattern).
    pub fn with_card_after(mut self, card: NewCard, responses: usize) -> Self {
        self.cards.push(PlacedCard::after(card, responses));
        self
    }

    /// Cards to place before the duel first runs.
    pub fn setup_cards(&self) -> impl Iterator<Item = &NewCard> {
        self.cards
            .iter()
            .filter(|placed| placed.after_responses.is_none())
            .map(|placed| &placed.card)
    }

    /// Cards placed mid-duel, with the response count each follows.
    pub fn later_cards(&self) -> impl Iterator<Item = (usize, NewCard)> + '_ {
        self.cards
            .iter()
            .filter_map(|placed| Some((placed.after_responses?, placed.card)))
    }

    pub fn with_responses(mut self, responses: Vec<Response>) -> Self {
        self.responses = responses;
        self
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a log written by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
