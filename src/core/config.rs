//! Duel configuration.
//!
//! `DuelOptions` collects everything needed to create a duel: the seed,
//! the duel flags passed to `start_duel`, per-player starting values, and
//! optionally a replay log to reproduce instead of starting fresh.

use serde::{Deserialize, Serialize};

use crate::replay::ReplayLog;

use super::player::{PlayerId, PlayerPair};
use super::seed::DuelSeed;

/// Default starting life points.
pub const DEFAULT_START_LP: u32 = 8000;

/// Starting values for one duelist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Life points at duel start.
    pub start_lp: u32,

    /// Cards drawn before the first turn.
    pub start_hand: u32,

    /// Cards drawn in each draw phase.
    pub draw_count: u32,
}

impl Default for PlayerInfo {
    fn default() -> Self {
        Self {
            start_lp: DEFAULT_START_LP,
            start_hand: 0,
            draw_count: 0,
        }
    }
}

impl PlayerInfo {
    /// Set starting life points.
    pub fn with_start_lp(mut self, lp: u32) -> Self {
        self.start_lp = lp;
        self
    }

    /// Set starting hand size.
    pub fn with_start_hand(mut self, count: u32) -> Self {
        self.start_hand = count;
        self
    }

    /// Set cards drawn per draw phase.
    pub fn with_draw_count(mut self, count: u32) -> Self {
        self.draw_count = count;
        self
    }
}

/// Options for creating a duel under test.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelOptions {
    /// Engine seed. `None` draws a random extended seed.
    pub seed: Option<DuelSeed>,

    /// Duel rule flags passed to `start_duel`.
    pub opt: u32,

    /// Starting values for both duelists.
    pub player_info: PlayerPair<PlayerInfo>,

    /// Reproduce a recorded duel instead of starting a fresh one.
    pub replay: Option<ReplayLog>,
}

impl DuelOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the engine seed.
    pub fn with_seed(mut self, seed: impl Into<DuelSeed>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Set duel rule flags.
    pub fn with_opt(mut self, opt: u32) -> Self {
        self.opt = opt;
        self
    }

    /// Set starting values for one player.
    pub fn with_player_info(mut self, player: PlayerId, info: PlayerInfo) -> Self {
        self.player_info[player] = info;
        self
    }

    /// Replay a recorded duel.
    pub fn with_replay(mut self, replay: ReplayLog) -> Self {
        self.replay = Some(replay);
        self
    }

    /// The configured seed, or a freshly drawn one.
    pub fn resolve_seed(&self) -> DuelSeed {
        self.seed.unwrap_or_else(DuelSeed::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = DuelOptions::default();
        assert_eq!(options.seed, None);
        assert_eq!(options.opt, 0);
        assert_eq!(options.player_info[PlayerId::FIRST].start_lp, 8000);
        assert_eq!(options.player_info[PlayerId::SECOND].start_hand, 0);
        assert!(options.replay.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let options = DuelOptions::new()
            .with_seed(123u32)
            .with_opt(0x20)
            .with_player_info(PlayerId::SECOND, PlayerInfo::default().with_start_lp(4000));

        assert_eq!(options.seed, Some(DuelSeed::Legacy(123)));
        assert_eq!(options.opt, 0x20);
        assert_eq!(options.player_info[PlayerId::SECOND].start_lp, 4000);
        assert_eq!(options.resolve_seed(), DuelSeed::Legacy(123));
    }

    #[test]
    fn test_serialization() {
        let options = DuelOptions::new().with_seed(DuelSeed::from_u64(9));
        let json = serde_json::to_string(&options).unwrap();
        let deserialized: DuelOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(options, deserialized);
    }
}
