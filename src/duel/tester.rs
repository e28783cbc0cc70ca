//! The message-loop driver.
//!
//! `DuelTester` owns one engine and pumps it. Each `advance` call runs the
//! engine until the given advancor defers or the duel ends; `checkpoint`
//! hands the pending message to scenario code and continues from whatever
//! it decides.
//!
//! ## Phases
//!
//! ```text
//! Created ──advance──▶ Running ──defer──▶ AwaitingManualResponse
//!                        │   ▲                    │
//!                        │   └──────advance───────┘
//!                        └──end of duel──▶ Ended
//! ```
//!
//! ## Logs
//!
//! Messages and responses of the current cycle are buffered and appended to
//! the cumulative logs at the end of every `advance`. A checkpoint clears the
//! current buffers. Entries reach the cumulative logs exactly once.

use tracing::{debug, info, trace, warn};

use crate::advancors::{Advancor, PolicyResult, StaticAdvancor};
use crate::core::{CardLocation, DuelOptions, HarnessError, PlayerId, Result};
use crate::engine::{DuelBackend, DuelEngine, FieldInfo, NewCard, ProcessStatus};
use crate::protocol::constants::{LOCATION_DECK, LOCATION_EXTRA};
use crate::protocol::{Message, MessageKind, Response};
use crate::replay::{PlacedCard, ReplayLog};

use super::card_handle::CardHandle;
use super::checkpoint::Checkpoint;

/// Driver state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DuelPhase {
    /// Set up, never advanced.
    Created,
    /// Inside an `advance` loop.
    Running,
    /// Stopped on a message no advancor answered.
    AwaitingManualResponse,
    /// The engine reported the end of the duel, or `end` was called.
    Ended,
}

/// Drives one duel.
pub struct DuelTester<B: DuelBackend> {
    backend: B,
    engine: B::Engine,
    phase: DuelPhase,
    released: bool,

    last_message: Option<Message>,
    current_messages: Vec<Message>,
    current_responses: Vec<Response>,
    committed_messages: usize,
    committed_responses: usize,
    all_messages: Vec<Message>,
    all_responses: Vec<Response>,

    faults: Vec<String>,
    setup: ReplayLog,
}

impl<B: DuelBackend> DuelTester<B> {
    /// Create the duel described by `options`.
    ///
    /// A fresh duel gets its seed, both players' info and the rule flags. A
    /// replayed duel is rebuilt by the backend and then advanced through its
    /// recorded responses.
    pub fn new(mut backend: B, options: DuelOptions) -> Result<Self> {
        let seed = options.resolve_seed();
        let DuelOptions {
            opt,
            player_info,
            replay,
            ..
        } = options;

        let (engine, setup, recorded) = match replay {
            Some(replay) => {
                let engine = backend.create_duel_from_replay(&replay)?;
                info!(
                    seed = ?replay.seed,
                    responses = replay.responses.len(),
                    "Replaying recorded duel"
                );
                let recorded = replay.responses.clone();
                (engine, replay.with_responses(Vec::new()), Some(recorded))
            }
            None => {
                let mut engine = backend.create_duel(&seed)?;
                for (player, info) in player_info.iter() {
                    engine.set_player_info(player, info);
                }
                engine.start_duel(opt);
                info!(seed = ?seed, opt = opt, "Created duel");
                let setup = ReplayLog::new(seed)
                    .with_opt(opt)
                    .with_player_info(player_info);
                (engine, setup, None)
            }
        };

        let mut tester = Self {
            backend,
            engine,
            phase: DuelPhase::Created,
            released: false,
            last_message: None,
            current_messages: Vec::new(),
            current_responses: Vec::new(),
            committed_messages: 0,
            committed_responses: 0,
            all_messages: Vec::new(),
            all_responses: Vec::new(),
            faults: Vec::new(),
            setup,
        };

        let ready = match recorded {
            Some(responses) => tester.replay(responses),
            None => Ok(()),
        }
        .and_then(|()| tester.check_faults());
        if let Err(err) = ready {
            tester.end();
            return Err(err);
        }
        Ok(tester)
    }

    /// Feed recorded responses back, placing each mid-duel card once as
    /// many responses have been sent as when it was first placed.
    fn replay(&mut self, responses: Vec<Response>) -> Result<()> {
        let later: Vec<(usize, NewCard)> = self.setup.later_cards().collect();
        let mut responses = responses.into_iter();
        let mut sent = 0;

        for (after, card) in later {
            if !self.is_ended() {
                let needed = after.saturating_sub(sent);
                let batch: Vec<Response> = responses.by_ref().take(needed).collect();
                sent += batch.len();
                let short = batch.len() < needed;
                self.advance(StaticAdvancor::new(batch))?;
                if short {
                    return Ok(());
                }
            }
            self.engine.new_card(&card);
        }

        if !self.is_ended() {
            self.advance(StaticAdvancor::new(responses))?;
        }
        Ok(())
    }

    // =========================================================================
    // Driving
    // =========================================================================

    /// Run the duel with `advancor` until it defers or the duel ends.
    ///
    /// A message left pending by an earlier call is offered to `advancor`
    /// first; if it defers on that, the engine is not touched.
    pub fn advance(&mut self, mut advancor: impl Advancor) -> Result<&mut Self> {
        if self.phase == DuelPhase::Ended {
            return Err(HarnessError::DuelEnded);
        }

        if self.phase == DuelPhase::AwaitingManualResponse {
            if let Some(pending) = &self.last_message {
                match advancor.advance(pending) {
                    PolicyResult::Responded(response) => {
                        self.last_message = None;
                        self.respond(response);
                    }
                    PolicyResult::Deferred => {
                        debug!(kind = %pending.kind(), "Pending message left unanswered");
                        return Ok(self);
                    }
                }
            }
        }

        self.phase = DuelPhase::Running;
        let outcome = self.run(&mut advancor);
        self.commit();
        outcome.map(|()| self)
    }

    /// Answer the pending message with fixed bytes, then run until the next
    /// prompt.
    pub fn advance_with_response(&mut self, response: Response) -> Result<&mut Self> {
        self.advance(StaticAdvancor::new([response]))
    }

    /// Inspect the pending message and decide how to continue.
    ///
    /// Raises collected script errors first. With `expected` set, the pending
    /// message must be of that kind.
    pub fn checkpoint<'a, F>(&mut self, expected: Option<MessageKind>, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&Self, &Message) -> Result<Checkpoint<'a>>,
    {
        self.check_faults()?;
        if self.phase == DuelPhase::Ended {
            return Err(HarnessError::DuelEnded);
        }

        let message = self.last_message.as_ref().ok_or(HarnessError::NoPendingMessage)?;
        if let Some(expected) = expected {
            if message.kind() != expected {
                return Err(HarnessError::UnexpectedMessage {
                    expected,
                    found: message.kind().to_string(),
                });
            }
        }

        let lp = self.engine.query_field_info().lp;
        info!(
            kind = %message.kind(),
            lp0 = lp[PlayerId::FIRST],
            lp1 = lp[PlayerId::SECOND],
            "Checkpoint"
        );

        let next = f(self, message)?;
        self.clear_current();

        match next {
            Checkpoint::Advance(advancor) => self.advance(advancor),
            Checkpoint::Respond(response) => self.advance_with_response(response),
            Checkpoint::Stop => Ok(self),
        }
    }

    fn run(&mut self, advancor: &mut impl Advancor) -> Result<()> {
        loop {
            let result = self.engine.process();
            self.collect_faults();
            debug!(
                status = ?result.status,
                kind = ?result.message.as_ref().map(Message::kind),
                raw_len = result.raw.len(),
                "Engine step"
            );

            if let Some(message) = &result.message {
                self.current_messages.push(message.clone());
                if message.is_response_capable() {
                    self.last_message = Some(message.clone());
                }
            }

            match result.status {
                ProcessStatus::Continue => {}
                ProcessStatus::Ended => {
                    self.phase = DuelPhase::Ended;
                    info!("Duel ended");
                    return Ok(());
                }
                ProcessStatus::NeedsResponse => {
                    let Some(message) = result.message else {
                        continue;
                    };
                    if !message.is_response_capable() {
                        return Err(HarnessError::NotResponseCapable { kind: message.kind() });
                    }
                    match advancor.advance(&message) {
                        PolicyResult::Responded(response) => self.respond(response),
                        PolicyResult::Deferred => {
                            self.phase = DuelPhase::AwaitingManualResponse;
                            debug!(kind = %message.kind(), "Awaiting manual response");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    fn respond(&mut self, response: Response) {
        trace!(bytes = ?response.as_bytes(), "Response");
        self.engine.set_response(&response);
        self.current_responses.push(response);
    }

    fn commit(&mut self) {
        self.all_messages
            .extend_from_slice(&self.current_messages[self.committed_messages..]);
        self.all_responses
            .extend_from_slice(&self.current_responses[self.committed_responses..]);
        self.committed_messages = self.current_messages.len();
        self.committed_responses = self.current_responses.len();
    }

    fn clear_current(&mut self) {
        self.current_messages.clear();
        self.current_responses.clear();
        self.committed_messages = 0;
        self.committed_responses = 0;
    }

    // =========================================================================
    // Faults
    // =========================================================================

    fn collect_faults(&mut self) {
        for fault in self.engine.take_faults() {
            warn!(fault = %fault, "Script error");
            self.faults.push(fault);
        }
    }

    /// Raise every script error collected so far as one error.
    pub fn check_faults(&mut self) -> Result<()> {
        self.collect_faults();
        if self.faults.is_empty() {
            return Ok(());
        }
        Err(HarnessError::ScriptErrors(std::mem::take(&mut self.faults)))
    }

    // =========================================================================
    // Setup and queries
    // =========================================================================

    /// Place a card. Cards placed after the duel first ran are recorded with
    /// the number of responses sent so far.
    pub fn add_card(&mut self, card: NewCard) -> Result<&mut Self> {
        self.engine.new_card(&card);
        let placed = match self.phase {
            DuelPhase::Created => PlacedCard::at_setup(card),
            _ => PlacedCard::after(card, self.all_responses.len()),
        };
        self.setup.cards.push(placed);
        self.check_faults()?;
        Ok(self)
    }

    /// Place several cards in order.
    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = NewCard>) -> Result<&mut Self> {
        for card in cards {
            self.add_card(card)?;
        }
        Ok(self)
    }

    /// The card at `at`, viewed against the pending message.
    pub fn get_card(&self, at: CardLocation) -> Option<CardHandle<'_>> {
        let info = self.engine.query_card(at)?;
        Some(CardHandle::new(at, info, self.last_message.as_ref()))
    }

    /// Every card in the zones selected by `self_mask` on `player`'s side
    /// and `opponent_mask` on the other side.
    pub fn get_field_card(&self, player: PlayerId, self_mask: u32, opponent_mask: u32) -> Vec<CardHandle<'_>> {
        let mut cards = Vec::new();
        for (side, mask) in [(player, self_mask), (player.opponent(), opponent_mask)] {
            let zones = std::iter::successors(Some(LOCATION_DECK), |l| Some(l << 1))
                .take_while(|&l| l <= LOCATION_EXTRA);
            for location in zones.filter(|l| mask & l != 0) {
                let slots = self.engine.query_field_card(side, location);
                for (sequence, slot) in slots.into_iter().enumerate() {
                    if let Some(info) = slot {
                        let at = CardLocation::new(side, location, sequence as u32);
                        cards.push(CardHandle::new(at, info, self.last_message.as_ref()));
                    }
                }
            }
        }
        cards
    }

    pub fn get_lp(&self, player: PlayerId) -> i32 {
        self.engine.query_field_info().lp[player]
    }

    pub fn query_field_info(&self) -> FieldInfo {
        self.engine.query_field_info()
    }

    /// Setup, placed cards and every response sent so far. Feeding it back
    /// through `DuelOptions::with_replay` reproduces this run.
    pub fn replay_log(&self) -> ReplayLog {
        self.setup.clone().with_responses(self.all_responses.clone())
    }

    /// End the duel and release the backend. Safe to call twice.
    pub fn end(&mut self) {
        self.phase = DuelPhase::Ended;
        if self.released {
            return;
        }
        self.released = true;
        self.engine.end_duel();
        self.backend.finalize();
        debug!(responses = self.all_responses.len(), "Duel released");
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn phase(&self) -> DuelPhase {
        self.phase
    }

    pub fn is_ended(&self) -> bool {
        self.phase == DuelPhase::Ended
    }

    /// The most recent response-capable message.
    pub fn last_message(&self) -> Option<&Message> {
        self.last_message.as_ref()
    }

    /// Messages since the last checkpoint.
    pub fn current_messages(&self) -> &[Message] {
        &self.current_messages
    }

    /// Responses since the last checkpoint.
    pub fn current_responses(&self) -> &[Response] {
        &self.current_responses
    }

    pub fn all_messages(&self) -> &[Message] {
        &self.all_messages
    }

    pub fn all_responses(&self) -> &[Response] {
        &self.all_responses
    }

    pub fn engine(&self) -> &B::Engine {
        &self.engine
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: DuelBackend> std::fmt::Debug for DuelTester<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuelTester")
            .field("phase", &self.phase)
            .field("last_message", &self.last_message.as_ref().map(Message::kind))
            .field("messages", &self.all_messages.len())
            .field("responses", &self.all_responses.len())
            .finish()
    }
}

/// Run `f` against a fresh tester, ending the duel afterwards whatever `f`
/// returns.
pub fn with_duel_tester<B, T, F>(backend: B, options: DuelOptions, f: F) -> Result<T>
where
    B: DuelBackend,
    F: FnOnce(&mut DuelTester<B>) -> Result<T>,
{
    let mut tester = DuelTester::new(backend, options)?;
    let result = f(&mut tester);
    tester.end();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advancors::DefaultResponseAdvancor;
    use crate::core::DuelSeed;
    use crate::engine::{ScriptedBackend, ScriptedEngine, Step};
    use crate::protocol::SelectYesNoMsg;

    fn yes_no() -> Message {
        Message::SelectYesNo(SelectYesNoMsg {
            player: PlayerId::FIRST,
            desc: 0,
        })
    }

    fn tester(steps: Vec<Step>) -> DuelTester<ScriptedBackend> {
        let backend = ScriptedBackend::new().with_duel(ScriptedEngine::new(steps));
        DuelTester::new(backend, DuelOptions::new().with_seed(1u32)).unwrap()
    }

    #[test]
    fn test_fresh_duel_setup() {
        let t = tester(vec![Step::End]);
        assert_eq!(t.phase(), DuelPhase::Created);
        assert_eq!(t.engine().started_with(), Some(0));
        assert!(t.engine().player_info(PlayerId::SECOND).is_some());
        assert_eq!(t.backend().seeds(), &[DuelSeed::Legacy(1)]);
        assert_eq!(t.get_lp(PlayerId::FIRST), 8000);
    }

    #[test]
    fn test_defer_then_resume() {
        let mut t = tester(vec![Step::Prompt(yes_no()), Step::End]);

        t.advance(crate::advancors::advancor_fn(|_: &Message| None::<Response>)).unwrap();
        assert_eq!(t.phase(), DuelPhase::AwaitingManualResponse);
        assert_eq!(t.last_message().map(Message::kind), Some(MessageKind::SelectYesNo));

        t.advance(DefaultResponseAdvancor).unwrap();
        assert!(t.is_ended());
        assert_eq!(t.all_responses(), &[Response::from_i32(0)]);
        assert_eq!(t.all_messages().len(), 1);
    }

    #[test]
    fn test_faults_surface_at_checkpoint() {
        let mut t = tester(vec![Step::Fault("bad script".into()), Step::Prompt(yes_no())]);
        t.advance(crate::advancors::advancor_fn(|_: &Message| None::<Response>)).unwrap();

        match t.checkpoint(None, |_, _| Ok(Checkpoint::Stop)) {
            Err(HarnessError::ScriptErrors(errors)) => assert_eq!(errors, vec!["bad script".to_string()]),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
        // Raised once
        assert!(t.checkpoint(None, |_, _| Ok(Checkpoint::Stop)).is_ok());
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut t = tester(vec![Step::End]);
        t.end();
        t.end();
        assert!(t.engine().is_released());
        assert!(t.backend().is_finalized());
        assert!(matches!(t.advance(DefaultResponseAdvancor), Err(HarnessError::DuelEnded)));
    }
}
