//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe identifier for one of the two duelists.
//!
//! ## PlayerPair
//!
//! Fixed two-slot storage indexed by `PlayerId`. Duels always have exactly
//! two players, so this is a plain array rather than a growable map.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Duelist identifier, as it appears on the wire.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The player who goes first.
    pub const FIRST: PlayerId = PlayerId(0);

    /// The player who goes second.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other duelist.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - (self.0 & 1))
    }

    /// Iterate over both players in turn order.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [Self::FIRST, Self::SECOND].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per duelist.
///
/// ```
/// use duel_harness::core::{PlayerId, PlayerPair};
///
/// let mut lp = PlayerPair::with_value(8000);
/// lp[PlayerId::SECOND] = 4000;
/// assert_eq!(lp[PlayerId::FIRST], 8000);
/// assert_eq!(lp[PlayerId::SECOND], 4000);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; 2],
}

impl<T> PlayerPair<T> {
    /// Create from explicit values for the first and second player.
    pub fn new(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Create with values from a factory function.
    pub fn from_fn(factory: impl Fn(PlayerId) -> T) -> Self {
        Self::new(factory(PlayerId::FIRST), factory(PlayerId::SECOND))
    }

    /// Create with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(value.clone(), value)
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index() & 1]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index() & 1]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::both().zip(self.data.iter())
    }
}

impl<T> Index<PlayerId> for PlayerPair<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerPair<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
