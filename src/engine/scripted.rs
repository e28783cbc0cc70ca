//! In-memory engine that plays back a fixed script.
//!
//! `ScriptedEngine` reports a prepared list of steps and records whatever
//! the harness sends back. It is enough to exercise the duel loop, the
//! advancors and the card handles without a real rules engine.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::core::{CardLocation, DuelSeed, HarnessError, PlayerId, PlayerInfo, PlayerPair, Result};
use crate::protocol::{CommandCard, Message, Response};
use crate::replay::ReplayLog;

use super::query::{CardInfo, FieldInfo, NewCard};
use super::{DuelBackend, DuelEngine, ProcessResult};

/// One scripted engine step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Report an informational message.
    Info(Message),
    /// Report a message and block until answered.
    Prompt(Message),
    /// Raise a script fault and keep going.
    Fault(String),
    /// End the duel.
    End,
}

/// Scripted [`DuelEngine`].
#[derive(Clone, Debug, Default)]
pub struct ScriptedEngine {
    steps: VecDeque<Step>,
    awaiting: Option<Message>,
    pending: Option<Response>,
    ended: bool,

    responses: Vec<Response>,
    faults: Vec<String>,
    cards: FxHashMap<CardLocation, CardInfo>,
    lp: PlayerPair<i32>,
    chains: Vec<CommandCard>,

    player_info: PlayerPair<Option<PlayerInfo>>,
    started_with: Option<u32>,
    released: bool,
}

impl ScriptedEngine {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Add a card to the field table (builder pattern).
    #[must_use]
    pub fn with_card(mut self, at: CardLocation, info: CardInfo) -> Self {
        self.cards.insert(at, info);
        self
    }

    /// Set the chain reported by field queries (builder pattern).
    #[must_use]
    pub fn with_chain(mut self, chains: Vec<CommandCard>) -> Self {
        self.chains = chains;
        self
    }

    /// Overwrite a player's life points.
    pub fn set_lp(&mut self, player: PlayerId, lp: i32) {
        self.lp[player] = lp;
    }

    /// Every response consumed so far, in order.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// Steps not yet reported.
    pub fn remaining_steps(&self) -> usize {
        self.steps.len()
    }

    /// Player info received before the duel started.
    pub fn player_info(&self, player: PlayerId) -> Option<&PlayerInfo> {
        self.player_info[player].as_ref()
    }

    /// Rule flags passed to `start_duel`, if it was called.
    pub fn started_with(&self) -> Option<u32> {
        self.started_with
    }

    /// Whether `end_duel` was called.
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl DuelEngine for ScriptedEngine {
    fn process(&mut self) -> ProcessResult {
        if self.ended {
            return ProcessResult::ended(None);
        }

        if let Some(prompt) = self.awaiting.take() {
            match self.pending.take() {
                Some(response) => self.responses.push(response),
                None => {
                    // Still unanswered
                    let result = ProcessResult::needs_response(prompt.clone());
                    self.awaiting = Some(prompt);
                    return result;
                }
            }
        }

        match self.steps.pop_front() {
            Some(Step::Info(message)) => ProcessResult::progress(Some(message)),
            Some(Step::Prompt(message)) => {
                self.awaiting = Some(message.clone());
                ProcessResult::needs_response(message)
            }
            Some(Step::Fault(fault)) => {
                self.faults.push(fault);
                ProcessResult::progress(None)
            }
            Some(Step::End) | None => {
                self.ended = true;
                ProcessResult::ended(None)
            }
        }
    }

    fn set_response(&mut self, response: &Response) {
        self.pending = Some(response.clone());
    }

    fn set_player_info(&mut self, player: PlayerId, info: &PlayerInfo) {
        self.lp[player] = i32::try_from(info.start_lp).unwrap_or(i32::MAX);
        self.player_info[player] = Some(*info);
    }

    fn new_card(&mut self, card: &NewCard) {
        let info = CardInfo::new(card.code)
            .with_owner(card.owner())
            .with_position(card.position());
        self.cards.insert(card.card_location(), info);
    }

    fn start_duel(&mut self, opt: u32) {
        self.started_with = Some(opt);
    }

    fn query_card(&self, at: CardLocation) -> Option<CardInfo> {
        self.cards.get(&at).cloned()
    }

    fn query_field_card(&self, player: PlayerId, location: u32) -> Vec<Option<CardInfo>> {
        let slots = self
            .cards
            .keys()
            .filter(|at| at.controller == player && at.location == location)
            .map(|at| at.sequence as usize + 1)
            .max()
            .unwrap_or(0);
        (0..slots)
            .map(|seq| self.query_card(CardLocation::new(player, location, seq as u32)))
            .collect()
    }

    fn query_field_info(&self) -> FieldInfo {
        FieldInfo {
            lp: self.lp.clone(),
            chains: self.chains.clone(),
        }
    }

    fn take_faults(&mut self) -> Vec<String> {
        std::mem::take(&mut self.faults)
    }

    fn end_duel(&mut self) {
        self.ended = true;
        self.released = true;
    }
}

/// Hands out prepared [`ScriptedEngine`]s, one per created duel.
#[derive(Clone, Debug, Default)]
pub struct ScriptedBackend {
    duels: VecDeque<ScriptedEngine>,
    seeds: Vec<DuelSeed>,
    replays: Vec<ReplayLog>,
    finalized: bool,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the engine for the next created duel (builder pattern).
    #[must_use]
    pub fn with_duel(mut self, engine: ScriptedEngine) -> Self {
        self.duels.push_back(engine);
        self
    }

    /// Seeds of every fresh duel created.
    pub fn seeds(&self) -> &[DuelSeed] {
        &self.seeds
    }

    /// Replay logs every replayed duel was created from.
    pub fn replays(&self) -> &[ReplayLog] {
        &self.replays
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn next_duel(&mut self) -> Result<ScriptedEngine> {
        self.duels
            .pop_front()
            .ok_or_else(|| HarnessError::Engine("no scripted duel prepared".to_string()))
    }
}

impl DuelBackend for ScriptedBackend {
    type Engine = ScriptedEngine;

    fn create_duel(&mut self, seed: &DuelSeed) -> Result<ScriptedEngine> {
        let engine = self.next_duel()?;
        self.seeds.push(*seed);
        Ok(engine)
    }

    fn create_duel_from_replay(&mut self, replay: &ReplayLog) -> Result<ScriptedEngine> {
        let mut engine = self.next_duel()?;
        for (player, info) in replay.player_info.iter() {
            engine.set_player_info(player, info);
        }
        engine.start_duel(replay.opt);
        for card in replay.setup_cards() {
            engine.new_card(card);
        }
        self.replays.push(replay.clone());
        Ok(engine)
    }

    fn finalize(&mut self) {
        self.finalized = true;
    }
}
