//! The duel engine boundary.
//!
//! The harness never simulates a duel itself. It drives an opaque engine
//! through [`DuelEngine`]: step it with `process`, answer blocking prompts
//! with `set_response`, and inspect the field through the query methods.
//! A [`DuelBackend`] owns whatever the engine needs (card database, script
//! readers) and creates one engine per duel.
//!
//! ## Implementation Notes
//!
//! - `process` runs until the engine has one message to report
//! - After a `NeedsResponse` result, the next `process` consumes the
//!   response set in between; without one the engine may re-ask
//! - `take_faults` drains errors the engine raised from card scripts

mod query;
mod scripted;

pub use query::{CardInfo, FieldInfo, NewCard};
pub use scripted::{ScriptedBackend, ScriptedEngine, Step};

use crate::core::{CardLocation, DuelSeed, PlayerId, PlayerInfo, Result};
use crate::protocol::{Message, Response};
use crate::replay::ReplayLog;

/// What one engine step produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProcessStatus {
    /// Keep stepping.
    Continue,
    /// The reported message blocks until answered.
    NeedsResponse,
    /// The duel is over.
    Ended,
}

/// Result of [`DuelEngine::process`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessResult {
    pub status: ProcessStatus,
    /// Undecoded message bytes; empty when the step produced no message.
    pub raw: Vec<u8>,
    pub message: Option<Message>,
}

impl ProcessResult {
    /// A step that reported `message` and keeps going.
    pub fn progress(message: Option<Message>) -> Self {
        Self::with_status(ProcessStatus::Continue, message)
    }

    /// A step that blocks on `message`.
    pub fn needs_response(message: Message) -> Self {
        Self::with_status(ProcessStatus::NeedsResponse, Some(message))
    }

    /// The final step.
    pub fn ended(message: Option<Message>) -> Self {
        Self::with_status(ProcessStatus::Ended, message)
    }

    fn with_status(status: ProcessStatus, message: Option<Message>) -> Self {
        let raw = message.as_ref().map(|m| vec![m.identifier()]).unwrap_or_default();
        Self { status, raw, message }
    }
}

/// One running duel.
pub trait DuelEngine {
    /// Advance until the next message.
    fn process(&mut self) -> ProcessResult;

    /// Answer the prompt reported by the last `NeedsResponse` step.
    fn set_response(&mut self, response: &Response);

    /// Configure a player before `start_duel`.
    fn set_player_info(&mut self, player: PlayerId, info: &PlayerInfo);

    /// Place a card. Usable before and during the duel.
    fn new_card(&mut self, card: &NewCard);

    /// Begin play with the given rule flags.
    fn start_duel(&mut self, opt: u32);

    /// The card at `at`, if any.
    fn query_card(&self, at: CardLocation) -> Option<CardInfo>;

    /// Every slot of one zone, indexed by sequence. Empty slots are `None`.
    fn query_field_card(&self, player: PlayerId, location: u32) -> Vec<Option<CardInfo>>;

    /// Life points and the current chain.
    fn query_field_info(&self) -> FieldInfo;

    /// Drain script faults raised since the last call.
    fn take_faults(&mut self) -> Vec<String>;

    /// Release the duel.
    fn end_duel(&mut self);
}

/// Creates engines.
pub trait DuelBackend {
    type Engine: DuelEngine;

    /// Create a fresh duel.
    fn create_duel(&mut self, seed: &DuelSeed) -> Result<Self::Engine>;

    /// Recreate a recorded duel with its setup cards placed. The recorded
    /// responses and mid-duel cards are not applied; the caller feeds them
    /// back in order.
    fn create_duel_from_replay(&mut self, replay: &ReplayLog) -> Result<Self::Engine>;

    /// Release backend resources once no duel is running.
    fn finalize(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_result_raw_bytes() {
        let result = ProcessResult::progress(Some(Message::Retry));
        assert_eq!(result.raw, vec![crate::protocol::constants::MSG_RETRY]);
        assert_eq!(result.status, ProcessStatus::Continue);

        let result = ProcessResult::ended(None);
        assert!(result.raw.is_empty());
        assert!(result.message.is_none());
    }
}
