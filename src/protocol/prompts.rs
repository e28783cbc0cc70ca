//! Payloads of response-capable messages.
//!
//! Each prompt knows who must answer it, how to encode a semantically valid
//! answer (`prepare_response`), and what the trivial answer is
//! (`default_response`). Encoding validates the payload against what the
//! prompt offered and returns `InvalidResponse` otherwise.

use serde::{Deserialize, Serialize};

use crate::core::{CardLocation, HarnessError, PlayerId, Result};
use crate::select::{sum, FilterQueue};

use super::card::{position_of, AttackableCard, Candidate, CommandCard, CounterCard, Located, Place};
use super::constants::{
    LOCATION_MZONE, LOCATION_SZONE, MZONE_SLOTS, RESPONSE_DECLINE, SZONE_SLOTS,
};
use super::response::{to_byte, Response};

fn invalid(reason: impl Into<String>) -> HarnessError {
    HarnessError::InvalidResponse(reason.into())
}

/// Check a list of picks: in range, no repeats, count within `[min, max]`.
fn check_picks(indices: &[usize], len: usize, min: usize, max: usize) -> Result<()> {
    for (n, &i) in indices.iter().enumerate() {
        if i >= len {
            return Err(invalid(format!("index {} out of {} candidates", i, len)));
        }
        if indices[..n].contains(&i) {
            return Err(invalid(format!("index {} picked twice", i)));
        }
    }
    if indices.len() < min || indices.len() > max {
        return Err(invalid(format!(
            "picked {} cards, expected {}..={}",
            indices.len(),
            min,
            max
        )));
    }
    Ok(())
}

fn find_command(items: &[CommandCard], at: CardLocation, desc: Option<u32>) -> Option<usize> {
    items
        .iter()
        .position(|c| c.card_location() == at && desc.is_none_or(|d| c.desc == d))
}

// =============================================================================
// Commands
// =============================================================================

/// Main phase command kinds, in wire order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdleCmdType {
    Summon = 0,
    SpSummon = 1,
    Repos = 2,
    Mset = 3,
    Sset = 4,
    Activate = 5,
    ToBattle = 6,
    ToEnd = 7,
    Shuffle = 8,
}

/// Main phase: choose what to do next.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectIdleCmdMsg {
    pub player: PlayerId,
    pub summonable: Vec<CommandCard>,
    pub spsummonable: Vec<CommandCard>,
    pub repositionable: Vec<CommandCard>,
    pub msetable: Vec<CommandCard>,
    pub ssetable: Vec<CommandCard>,
    pub activatable: Vec<CommandCard>,
    pub can_battle: bool,
    pub can_end: bool,
    pub can_shuffle: bool,
}

impl SelectIdleCmdMsg {
    fn list(&self, cmd: IdleCmdType) -> Option<&[CommandCard]> {
        match cmd {
            IdleCmdType::Summon => Some(&self.summonable),
            IdleCmdType::SpSummon => Some(&self.spsummonable),
            IdleCmdType::Repos => Some(&self.repositionable),
            IdleCmdType::Mset => Some(&self.msetable),
            IdleCmdType::Sset => Some(&self.ssetable),
            IdleCmdType::Activate => Some(&self.activatable),
            IdleCmdType::ToBattle | IdleCmdType::ToEnd | IdleCmdType::Shuffle => None,
        }
    }

    /// Encode a command. Card commands need the card's location; `desc`
    /// narrows activations when one card has several effects.
    pub fn prepare_response(
        &self,
        cmd: IdleCmdType,
        card: Option<CardLocation>,
        desc: Option<u32>,
    ) -> Result<Response> {
        let index = match (self.list(cmd), card) {
            (Some(list), Some(at)) => find_command(list, at, desc)
                .ok_or_else(|| invalid(format!("{} cannot {:?}", at, cmd)))?,
            (Some(_), None) => return Err(invalid(format!("{:?} needs a card", cmd))),
            (None, _) => {
                let allowed = match cmd {
                    IdleCmdType::ToBattle => self.can_battle,
                    IdleCmdType::ToEnd => self.can_end,
                    _ => self.can_shuffle,
                };
                if !allowed {
                    return Err(invalid(format!("{:?} is not offered", cmd)));
                }
                0
            }
        };
        Ok(Response::from_i32(((index as i32) << 16) | cmd as i32))
    }

    /// End the turn if allowed, else go to battle.
    pub fn default_response(&self) -> Option<Response> {
        [IdleCmdType::ToEnd, IdleCmdType::ToBattle]
            .into_iter()
            .find_map(|cmd| self.prepare_response(cmd, None, None).ok())
    }
}

/// Battle phase command kinds, in wire order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleCmdType {
    Activate = 0,
    Attack = 1,
    ToMain2 = 2,
    ToEnd = 3,
}

/// Battle phase: choose what to do next.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectBattleCmdMsg {
    pub player: PlayerId,
    pub activatable: Vec<CommandCard>,
    pub attackable: Vec<AttackableCard>,
    pub can_main2: bool,
    pub can_end: bool,
}

impl SelectBattleCmdMsg {
    /// Encode a command. Activations and attacks need the card's location.
    pub fn prepare_response(
        &self,
        cmd: BattleCmdType,
        card: Option<CardLocation>,
        desc: Option<u32>,
    ) -> Result<Response> {
        let index = match (cmd, card) {
            (BattleCmdType::Activate, Some(at)) => find_command(&self.activatable, at, desc),
            (BattleCmdType::Attack, Some(at)) => position_of(&self.attackable, at),
            (BattleCmdType::ToMain2, _) => self.can_main2.then_some(0),
            (BattleCmdType::ToEnd, _) => self.can_end.then_some(0),
            (_, None) => return Err(invalid(format!("{:?} needs a card", cmd))),
        }
        .ok_or_else(|| invalid(format!("{:?} is not offered", cmd)))?;
        Ok(Response::from_i32(((index as i32) << 16) | cmd as i32))
    }

    /// End the battle phase if allowed, else move to main phase 2.
    pub fn default_response(&self) -> Option<Response> {
        [BattleCmdType::ToEnd, BattleCmdType::ToMain2]
            .into_iter()
            .find_map(|cmd| self.prepare_response(cmd, None, None).ok())
    }
}

// =============================================================================
// Yes / no / option
// =============================================================================

/// Whether to activate a specific card's optional effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectEffectYnMsg {
    pub player: PlayerId,
    pub code: u32,
    pub controller: PlayerId,
    pub location: u32,
    pub sequence: u32,
    pub desc: u32,
}

impl SelectEffectYnMsg {
    /// Encode yes or no.
    pub fn prepare_response(&self, yes: bool) -> Response {
        Response::from_i32(i32::from(yes))
    }
}

impl Located for SelectEffectYnMsg {
    fn code(&self) -> u32 {
        self.code
    }

    fn card_location(&self) -> CardLocation {
        CardLocation::new(self.controller, self.location, self.sequence)
    }
}

/// A generic yes/no question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectYesNoMsg {
    pub player: PlayerId,
    pub desc: u32,
}

impl SelectYesNoMsg {
    /// Encode yes or no.
    pub fn prepare_response(&self, yes: bool) -> Response {
        Response::from_i32(i32::from(yes))
    }
}

/// Choose one of several described options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOptionMsg {
    pub player: PlayerId,
    pub options: Vec<u32>,
}

impl SelectOptionMsg {
    /// Encode the chosen option index.
    pub fn prepare_response(&self, index: usize) -> Result<Response> {
        if index >= self.options.len() {
            return Err(invalid(format!("option {} out of {}", index, self.options.len())));
        }
        Ok(Response::from_i32(index as i32))
    }
}

// =============================================================================
// Card selection
// =============================================================================

/// Choose between `min` and `max` of the offered cards.
///
/// Also used for tribute prompts, which share the layout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectCardMsg {
    pub player: PlayerId,
    pub cancelable: bool,
    pub min: u32,
    pub max: u32,
    pub cards: Vec<Candidate>,
}

impl SelectCardMsg {
    /// Encode the picked candidate indices.
    pub fn prepare_response(&self, indices: &[usize]) -> Result<Response> {
        check_picks(indices, self.cards.len(), self.min as usize, self.max as usize)?;
        Response::index_list(indices)
    }

    /// Encode the picks by location instead of index.
    pub fn prepare_response_at(&self, cards: &[CardLocation]) -> Result<Response> {
        let indices = cards
            .iter()
            .map(|&at| position_of(&self.cards, at).ok_or(HarnessError::NotSelectable))
            .collect::<Result<Vec<_>>>()?;
        self.prepare_response(&indices)
    }

    /// Back out of the prompt.
    pub fn cancel(&self) -> Result<Response> {
        if !self.cancelable {
            return Err(invalid("prompt is not cancelable"));
        }
        Ok(Response::from_i32(RESPONSE_DECLINE))
    }

    /// The first `min` candidates.
    pub fn default_response(&self) -> Option<Response> {
        let indices: Vec<usize> = (0..self.min as usize).collect();
        self.prepare_response(&indices).ok()
    }
}

/// Pick cards one at a time, with the option to stop.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectUnselectCardMsg {
    pub player: PlayerId,
    pub finishable: bool,
    pub cancelable: bool,
    pub min: u32,
    pub max: u32,
    pub selectable: Vec<Candidate>,
    pub unselectable: Vec<Candidate>,
}

impl SelectUnselectCardMsg {
    /// Encode one pick, or `None` to finish / cancel.
    ///
    /// Indices address `selectable` followed by `unselectable`.
    pub fn prepare_response(&self, index: Option<usize>) -> Result<Response> {
        match index {
            None if self.finishable || self.cancelable => Ok(Response::from_i32(RESPONSE_DECLINE)),
            None => Err(invalid("prompt can neither finish nor cancel")),
            Some(i) => {
                let total = self.selectable.len() + self.unselectable.len();
                if i >= total {
                    return Err(invalid(format!("index {} out of {} cards", i, total)));
                }
                Ok(Response::from_bytes(&[1, to_byte(i)?]))
            }
        }
    }

    /// Finish when allowed, else take the first selectable card.
    pub fn default_response(&self) -> Option<Response> {
        if self.finishable || self.cancelable {
            return self.prepare_response(None).ok();
        }
        if self.selectable.is_empty() {
            return None;
        }
        self.prepare_response(Some(0)).ok()
    }
}

/// Choose cards whose weights add up to `sum_val`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectSumMsg {
    pub player: PlayerId,

    /// 1 = reach at least `sum_val`; anything else = hit it exactly.
    pub mode: u8,
    pub sum_val: u32,
    pub min: u32,
    pub max: u32,

    /// Already selected by the engine; counted, never re-sent.
    pub must_select: Vec<Candidate>,
    pub cards: Vec<Candidate>,
}

impl SelectSumMsg {
    /// Encode picks from `cards`. Must-select slots are emitted first as
    /// placeholders, which the engine skips.
    pub fn prepare_response(&self, indices: &[usize]) -> Result<Response> {
        check_picks(indices, self.cards.len(), 0, self.cards.len())?;
        let must = self.must_select.len();
        let mut response = Response::default();
        response.push(to_byte(must + indices.len())?);
        for i in 0..must {
            response.push(to_byte(i)?);
        }
        for &i in indices {
            response.push(to_byte(i)?);
        }
        Ok(response)
    }

    /// Whatever the sum solver finds without any filters.
    pub fn default_response(&self) -> Option<Response> {
        let plan = sum::plan(self, &FilterQueue::new())?;
        self.prepare_response(&plan.picks).ok()
    }
}

/// Choose one chain link to activate, or pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectChainMsg {
    pub player: PlayerId,
    pub spe_count: u8,
    pub forced: bool,
    pub chains: Vec<CommandCard>,
}

impl SelectChainMsg {
    /// Encode a chain index, or `None` to pass.
    pub fn prepare_response(&self, index: Option<usize>) -> Result<Response> {
        match index {
            None if self.forced => Err(invalid("chain activation is forced")),
            None => Ok(Response::from_i32(RESPONSE_DECLINE)),
            Some(i) if i < self.chains.len() => Ok(Response::from_i32(i as i32)),
            Some(i) => Err(invalid(format!("chain {} out of {}", i, self.chains.len()))),
        }
    }

    /// Encode the chain entry of the card at `at`.
    pub fn prepare_response_at(&self, at: CardLocation, desc: Option<u32>) -> Result<Response> {
        let index = find_command(&self.chains, at, desc).ok_or(HarnessError::NotSelectable)?;
        self.prepare_response(Some(index))
    }

    /// Pass unless forced, then take the first entry.
    pub fn default_response(&self) -> Option<Response> {
        self.prepare_response(if self.forced { Some(0) } else { None }).ok()
    }
}

// =============================================================================
// Places and positions
// =============================================================================

/// Choose zone slots. Set bits in `field_mask` are the blocked slots; the
/// low half belongs to `player`, the high half to the opponent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectPlaceMsg {
    pub player: PlayerId,
    pub count: u8,
    pub field_mask: u32,
}

impl SelectPlaceMsg {
    /// All open slots, own side first.
    pub fn selectable_places(&self) -> Vec<Place> {
        let mut places = Vec::new();
        for (half, owner) in [(0, self.player), (16, self.player.opponent())] {
            let zones = [(LOCATION_MZONE, 0, MZONE_SLOTS), (LOCATION_SZONE, 8, SZONE_SLOTS)];
            for (location, offset, slots) in zones {
                for sequence in 0..slots {
                    if self.field_mask & (1 << (half + offset + sequence)) == 0 {
                        places.push(Place::new(owner, location, sequence));
                    }
                }
            }
        }
        places
    }

    /// Encode `count` places as `[player, location, sequence]` triples.
    pub fn prepare_response(&self, places: &[Place]) -> Result<Response> {
        if places.len() != usize::from(self.count) {
            return Err(invalid(format!("expected {} places, got {}", self.count, places.len())));
        }
        let open = self.selectable_places();
        let mut response = Response::default();
        for place in places {
            if !open.contains(place) {
                return Err(invalid(format!("place {:?} is not selectable", place)));
            }
            response.push(place.player.0);
            response.push(to_byte(place.location as usize)?);
            response.push(to_byte(place.sequence as usize)?);
        }
        Ok(response)
    }

    /// The first `count` open slots.
    pub fn default_response(&self) -> Option<Response> {
        let places: Vec<Place> = self
            .selectable_places()
            .into_iter()
            .take(usize::from(self.count))
            .collect();
        self.prepare_response(&places).ok()
    }
}

/// Choose a battle position from the offered bits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectPositionMsg {
    pub player: PlayerId,
    pub code: u32,
    pub positions: u32,
}

impl SelectPositionMsg {
    /// Encode one position bit.
    pub fn prepare_response(&self, position: u32) -> Result<Response> {
        if position.count_ones() != 1 || self.positions & position == 0 {
            return Err(invalid(format!("position {:#x} is not offered", position)));
        }
        Ok(Response::from_i32(position as i32))
    }

    /// The lowest offered position bit.
    pub fn lowest_position(&self) -> Option<u32> {
        (0..8).map(|bit| 1u32 << bit).find(|p| self.positions & p != 0)
    }

    /// The lowest offered position.
    pub fn default_response(&self) -> Option<Response> {
        self.prepare_response(self.lowest_position()?).ok()
    }
}

// =============================================================================
// Counters, sorting, announcements
// =============================================================================

/// Remove `count` counters spread over the offered cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectCounterMsg {
    pub player: PlayerId,
    pub counter_type: u16,
    pub count: u16,
    pub cards: Vec<CounterCard>,
}

impl SelectCounterMsg {
    /// Encode how many counters come off each card.
    pub fn prepare_response(&self, amounts: &[u16]) -> Result<Response> {
        if amounts.len() != self.cards.len() {
            return Err(invalid("one amount per card is required"));
        }
        let total: u32 = amounts.iter().map(|&a| u32::from(a)).sum();
        if total != u32::from(self.count) {
            return Err(invalid(format!("removed {} counters, expected {}", total, self.count)));
        }
        let mut response = Response::default();
        for (amount, card) in amounts.iter().zip(&self.cards) {
            if *amount > card.counters {
                return Err(invalid(format!("{} has only {} counters", card.code, card.counters)));
            }
            response.push_u16(*amount);
        }
        Ok(response)
    }

    /// Take counters from the earliest cards first.
    pub fn default_response(&self) -> Option<Response> {
        let mut left = self.count;
        let amounts: Vec<u16> = self
            .cards
            .iter()
            .map(|card| {
                let take = left.min(card.counters);
                left -= take;
                take
            })
            .collect();
        self.prepare_response(&amounts).ok()
    }
}

/// Order the offered cards (or chain links).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCardMsg {
    pub player: PlayerId,
    pub cards: Vec<Candidate>,
}

impl SortCardMsg {
    /// Encode a permutation, or `None` to keep the current order.
    pub fn prepare_response(&self, order: Option<&[usize]>) -> Result<Response> {
        let Some(order) = order else {
            return Ok(Response::from_i32(RESPONSE_DECLINE));
        };
        check_picks(order, self.cards.len(), self.cards.len(), self.cards.len())?;
        let mut response = Response::default();
        for &i in order {
            response.push(to_byte(i)?);
        }
        Ok(response)
    }

    /// Keep the current order.
    pub fn default_response(&self) -> Option<Response> {
        self.prepare_response(None).ok()
    }
}

/// Declare `count` values from a bit mask (races or attributes).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnounceMaskMsg {
    pub player: PlayerId,
    pub count: u8,
    pub available: u32,
}

impl AnnounceMaskMsg {
    /// Encode the declared bits.
    pub fn prepare_response(&self, mask: u32) -> Result<Response> {
        if mask & !self.available != 0 || mask.count_ones() != u32::from(self.count) {
            return Err(invalid(format!("mask {:#x} does not declare {} offered values", mask, self.count)));
        }
        Ok(Response::from_i32(mask as i32))
    }

    /// The lowest `count` offered bits.
    pub fn default_response(&self) -> Option<Response> {
        let mask = (0..32)
            .map(|bit| 1u32 << bit)
            .filter(|b| self.available & b != 0)
            .take(usize::from(self.count))
            .fold(0, |acc, b| acc | b);
        self.prepare_response(mask).ok()
    }
}

/// Declare a card name. The engine validates against `opcodes`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnounceCardMsg {
    pub player: PlayerId,
    pub opcodes: Vec<u32>,
}

impl AnnounceCardMsg {
    /// Encode a card code.
    pub fn prepare_response(&self, code: u32) -> Response {
        Response::from_i32(code as i32)
    }
}

/// Declare one of the offered numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnounceNumberMsg {
    pub player: PlayerId,
    pub numbers: Vec<u32>,
}

impl AnnounceNumberMsg {
    /// Encode by index into `numbers`.
    pub fn prepare_response(&self, index: usize) -> Result<Response> {
        if index >= self.numbers.len() {
            return Err(invalid(format!("number {} out of {}", index, self.numbers.len())));
        }
        Ok(Response::from_i32(index as i32))
    }
}

/// Rock-paper-scissors hand: 1 = scissors, 2 = rock, 3 = paper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RockPaperScissorsMsg {
    pub player: PlayerId,
}

impl RockPaperScissorsMsg {
    /// Encode a hand.
    pub fn prepare_response(&self, hand: u8) -> Result<Response> {
        if !(1..=3).contains(&hand) {
            return Err(invalid(format!("hand {} is not 1..=3", hand)));
        }
        Ok(Response::from_i32(i32::from(hand)))
    }
}
