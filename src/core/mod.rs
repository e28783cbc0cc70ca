//! Core harness types: players, locations, seeds, configuration, errors.

pub mod player;
pub mod location;
pub mod seed;
pub mod config;
pub mod error;

pub use player::{PlayerId, PlayerPair};
pub use location::CardLocation;
pub use seed::DuelSeed;
pub use config::{DuelOptions, PlayerInfo, DEFAULT_START_LP};
pub use error::{HarnessError, Result};
