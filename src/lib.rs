//! # duel-harness
//!
//! A test harness for an opaque message/response card duel engine.
//!
//! The engine reports one message at a time. Some messages only inform;
//! others block until the harness sends back a response. Scenarios drive a
//! duel by composing response policies ("advancors") and stopping at
//! checkpoints to assert on the pending message.
//!
//! ## Design Principles
//!
//! 1. **Engine-Agnostic**: The engine sits behind [`DuelEngine`] and
//!    [`DuelBackend`]. The harness never simulates rules itself.
//!
//! 2. **Deferral Is Not Failure**: A policy that cannot answer defers; the
//!    loop hands the message back to the scenario instead of erroring.
//!
//! 3. **Reproducible Runs**: Every duel records its setup and responses in a
//!    [`ReplayLog`] that recreates the same run.
//!
//! ## Modules
//!
//! - `core`: Players, locations, seeds, options, errors
//! - `protocol`: Messages, prompt payloads, response encoding
//! - `engine`: Engine and backend traits, plus a scripted engine
//! - `advancors`: Response policies and combinators
//! - `select`: Filter queue and selection solvers
//! - `replay`: Recorded duels
//! - `duel`: The message-loop driver and card handles

pub mod core;
pub mod protocol;
pub mod engine;
pub mod advancors;
pub mod select;
pub mod replay;
pub mod duel;

// Re-export commonly used types
pub use crate::core::{
    CardLocation, DuelOptions, DuelSeed, HarnessError, PlayerId, PlayerInfo, PlayerPair, Result,
};

pub use crate::protocol::{Message, MessageKind, Response};

pub use crate::engine::{
    CardInfo, DuelBackend, DuelEngine, FieldInfo, NewCard, ProcessResult, ProcessStatus,
    ScriptedBackend, ScriptedEngine, Step,
};

pub use crate::advancors::{
    advancor_fn, Advancor, AdvancorExt, CombinedAdvancor, DefaultAdvancor,
    DefaultResponseAdvancor, LimitAdvancor, MapAdvancor, NoEffectAdvancor, PlayerViewAdvancor,
    PolicyResult, StaticAdvancor, SummonPlaceAdvancor,
};

pub use crate::select::{FilterQueue, SelectCardAdvancor, SelectionFilter};

pub use crate::replay::{PlacedCard, ReplayLog};

pub use crate::duel::{with_duel_tester, CardHandle, Checkpoint, DuelPhase, DuelTester};
