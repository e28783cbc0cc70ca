//! Card location addressing.
//!
//! A card on the field is identified by who controls it, which zone it is
//! in (one `LOCATION_*` bit) and its sequence within that zone.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Where a card sits: controller, zone bit, sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardLocation {
    pub controller: PlayerId,
    pub location: u32,
    pub sequence: u32,
}

impl CardLocation {
    /// Create a new location.
    #[must_use]
    pub const fn new(controller: PlayerId, location: u32, sequence: u32) -> Self {
        Self {
            controller,
            location,
            sequence,
        }
    }
}

impl std::fmt::Display for CardLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} loc {:#x} seq {}",
            self.controller, self.location, self.sequence
        )
    }
}
