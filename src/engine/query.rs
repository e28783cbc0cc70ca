//! Field query and card placement types.

use serde::{Deserialize, Serialize};

use crate::core::{CardLocation, PlayerId, PlayerPair};
use crate::protocol::constants::{FACEUP_LOCATIONS, POS_FACEDOWN_DEFENSE, POS_FACEUP_ATTACK};
use crate::protocol::CommandCard;

/// Queried state of one card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInfo {
    pub code: u32,
    pub alias: u32,
    pub owner: PlayerId,
    pub position: u32,
    pub level: u32,
    pub attack: i32,
    pub defense: i32,
}

impl CardInfo {
    pub fn new(code: u32) -> Self {
        Self {
            code,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_owner(mut self, owner: PlayerId) -> Self {
        self.owner = owner;
        self
    }

    #[must_use]
    pub fn with_stats(mut self, level: u32, attack: i32, defense: i32) -> Self {
        self.level = level;
        self.attack = attack;
        self.defense = defense;
        self
    }
}

/// Duel-wide state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub lp: PlayerPair<i32>,
    /// Links of the chain being built, oldest first.
    pub chains: Vec<CommandCard>,
}

/// A card to place with [`DuelEngine::new_card`](super::DuelEngine::new_card).
///
/// Owner defaults to the controller. Position defaults to face-up attack in
/// the monster zone, graveyard and banishment, face-down defense elsewhere.
///
/// ```
/// use duel_harness::core::PlayerId;
/// use duel_harness::engine::NewCard;
/// use duel_harness::protocol::constants::{LOCATION_HAND, LOCATION_MZONE, POS_FACEDOWN_DEFENSE, POS_FACEUP_ATTACK};
///
/// let monster = NewCard::new(1234, LOCATION_MZONE).with_controller(PlayerId::SECOND);
/// assert_eq!(monster.position(), POS_FACEUP_ATTACK);
/// assert_eq!(monster.owner(), PlayerId::SECOND);
/// assert_eq!(NewCard::new(1234, LOCATION_HAND).position(), POS_FACEDOWN_DEFENSE);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    pub code: u32,
    pub controller: PlayerId,
    pub owner: Option<PlayerId>,
    pub location: u32,
    pub sequence: u32,
    pub position: Option<u32>,
}

impl NewCard {
    /// Card `code` for the first player at sequence 0 of `location`.
    pub fn new(code: u32, location: u32) -> Self {
        Self {
            code,
            controller: PlayerId::FIRST,
            owner: None,
            location,
            sequence: 0,
            position: None,
        }
    }

    #[must_use]
    pub fn with_controller(mut self, controller: PlayerId) -> Self {
        self.controller = controller;
        self
    }

    #[must_use]
    pub fn with_owner(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    /// Owner, falling back to the controller.
    pub fn owner(&self) -> PlayerId {
        self.owner.unwrap_or(self.controller)
    }

    /// Position, falling back to the zone default.
    pub fn position(&self) -> u32 {
        self.position.unwrap_or(if self.location & FACEUP_LOCATIONS != 0 {
            POS_FACEUP_ATTACK
        } else {
            POS_FACEDOWN_DEFENSE
        })
    }

    pub fn card_location(&self) -> CardLocation {
        CardLocation::new(self.controller, self.location, self.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::constants::{
        LOCATION_DECK, LOCATION_GRAVE, LOCATION_REMOVED, LOCATION_SZONE, POS_FACEUP_DEFENSE,
    };

    #[test]
    fn test_default_positions() {
        assert_eq!(NewCard::new(1, LOCATION_GRAVE).position(), POS_FACEUP_ATTACK);
        assert_eq!(NewCard::new(1, LOCATION_REMOVED).position(), POS_FACEUP_ATTACK);
        assert_eq!(NewCard::new(1, LOCATION_SZONE).position(), POS_FACEDOWN_DEFENSE);
        assert_eq!(NewCard::new(1, LOCATION_DECK).position(), POS_FACEDOWN_DEFENSE);
        assert_eq!(
            NewCard::new(1, LOCATION_DECK).with_position(POS_FACEUP_DEFENSE).position(),
            POS_FACEUP_DEFENSE
        );
    }

    #[test]
    fn test_explicit_owner() {
        let card = NewCard::new(1, LOCATION_DECK)
            .with_controller(PlayerId::FIRST)
            .with_owner(PlayerId::SECOND);
        assert_eq!(card.owner(), PlayerId::SECOND);
        assert_eq!(card.card_location(), CardLocation::new(PlayerId::FIRST, LOCATION_DECK, 0));
    }
}
