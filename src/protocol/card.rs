//! Card entries carried by selection messages.
//!
//! Every list a message offers (selectable cards, chain candidates, idle
//! command targets, ...) identifies its cards by code plus location. The
//! `Located` trait gives uniform access to the location so filters and card
//! handles can look themselves up in any of these lists.

use serde::{Deserialize, Serialize};

use crate::core::{CardLocation, PlayerId};

/// Anything that names a card by code and location.
pub trait Located {
    /// Card passcode.
    fn code(&self) -> u32;

    /// Where the card is.
    fn card_location(&self) -> CardLocation;
}

/// A selectable card in a select-card, tribute, unselect or sum message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub code: u32,
    pub controller: PlayerId,
    pub location: u32,
    pub sequence: u32,
    pub position: u32,

    /// Packed weight for sum selection (see `select::sum::decode_op_param`).
    pub op_param: u32,
}

impl Candidate {
    /// Create a candidate at a location.
    #[must_use]
    pub fn new(code: u32, at: CardLocation) -> Self {
        Self {
            code,
            controller: at.controller,
            location: at.location,
            sequence: at.sequence,
            position: 0,
            op_param: 0,
        }
    }

    /// Set the packed sum weight.
    #[must_use]
    pub fn with_op_param(mut self, op_param: u32) -> Self {
        self.op_param = op_param;
        self
    }

    /// Set the battle position.
    #[must_use]
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }
}

impl Located for Candidate {
    fn code(&self) -> u32 {
        self.code
    }

    fn card_location(&self) -> CardLocation {
        CardLocation::new(self.controller, self.location, self.sequence)
    }
}

/// A card with an optional effect description, as listed by idle and battle
/// commands and chain prompts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandCard {
    pub code: u32,
    pub controller: PlayerId,
    pub location: u32,
    pub sequence: u32,

    /// Effect description id; 0 when the command is not an activation.
    pub desc: u32,
}

impl CommandCard {
    /// Create a command entry for a card.
    #[must_use]
    pub fn new(code: u32, at: CardLocation) -> Self {
        Self {
            code,
            controller: at.controller,
            location: at.location,
            sequence: at.sequence,
            desc: 0,
        }
    }

    /// Set the effect description.
    #[must_use]
    pub fn with_desc(mut self, desc: u32) -> Self {
        self.desc = desc;
        self
    }
}

impl Located for CommandCard {
    fn code(&self) -> u32 {
        self.code
    }

    fn card_location(&self) -> CardLocation {
        CardLocation::new(self.controller, self.location, self.sequence)
    }
}

/// A monster that may declare an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackableCard {
    pub code: u32,
    pub controller: PlayerId,
    pub location: u32,
    pub sequence: u32,
    pub direct_attack: bool,
}

impl Located for AttackableCard {
    fn code(&self) -> u32 {
        self.code
    }

    fn card_location(&self) -> CardLocation {
        CardLocation::new(self.controller, self.location, self.sequence)
    }
}

/// A card offered in a counter-removal prompt with its current counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CounterCard {
    pub code: u32,
    pub controller: PlayerId,
    pub location: u32,
    pub sequence: u32,
    pub counters: u16,
}

impl Located for CounterCard {
    fn code(&self) -> u32 {
        self.code
    }

    fn card_location(&self) -> CardLocation {
        CardLocation::new(self.controller, self.location, self.sequence)
    }
}

/// A zone slot, as answered to place prompts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Place {
    pub player: PlayerId,
    pub location: u32,
    pub sequence: u32,
}

impl Place {
    /// Create a place.
    #[must_use]
    pub const fn new(player: PlayerId, location: u32, sequence: u32) -> Self {
        Self {
            player,
            location,
            sequence,
        }
    }
}

/// Index of the first entry at `at`.
pub fn position_of<T: Located>(items: &[T], at: CardLocation) -> Option<usize> {
    items.iter().position(|item| item.card_location() == at)
}
