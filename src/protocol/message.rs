//! Decoded protocol messages.
//!
//! `Message` is the tagged union the engine hands back from `process()`.
//! `MessageKind` is its field-less discriminant, used as the dispatch key
//! by type-dispatch advancors and by checkpoint assertions.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

use super::constants::*;
use super::prompts::{
    AnnounceCardMsg, AnnounceMaskMsg, AnnounceNumberMsg, RockPaperScissorsMsg,
    SelectBattleCmdMsg, SelectCardMsg, SelectChainMsg, SelectCounterMsg, SelectEffectYnMsg,
    SelectIdleCmdMsg, SelectOptionMsg, SelectPlaceMsg, SelectPositionMsg, SelectSumMsg,
    SelectUnselectCardMsg, SelectYesNoMsg, SortCardMsg,
};
use super::response::Response;

/// Message discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MessageKind {
    Retry,
    Hint,
    Win,
    NewTurn,
    NewPhase,
    Draw,
    SelectBattleCmd,
    SelectIdleCmd,
    SelectEffectYn,
    SelectYesNo,
    SelectOption,
    SelectCard,
    SelectChain,
    SelectPlace,
    SelectPosition,
    SelectTribute,
    SortChain,
    SelectCounter,
    SelectSum,
    SelectDisField,
    SortCard,
    SelectUnselectCard,
    RockPaperScissors,
    AnnounceRace,
    AnnounceAttrib,
    AnnounceCard,
    AnnounceNumber,
    Other,
}

impl MessageKind {
    /// Whether messages of this kind block for a response.
    #[must_use]
    pub const fn is_response_capable(self) -> bool {
        !matches!(
            self,
            MessageKind::Retry
                | MessageKind::Hint
                | MessageKind::Win
                | MessageKind::NewTurn
                | MessageKind::NewPhase
                | MessageKind::Draw
                | MessageKind::Other
        )
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// One decoded protocol message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// The previous response was rejected.
    Retry,
    Hint {
        hint_type: u8,
        player: PlayerId,
        data: u64,
    },
    /// Duel over. `player` is the winner; a draw carries no winner.
    Win {
        player: Option<PlayerId>,
        reason: u8,
    },
    NewTurn {
        player: PlayerId,
    },
    NewPhase {
        phase: u16,
    },
    Draw {
        player: PlayerId,
        cards: Vec<u32>,
    },
    SelectBattleCmd(SelectBattleCmdMsg),
    SelectIdleCmd(SelectIdleCmdMsg),
    SelectEffectYn(SelectEffectYnMsg),
    SelectYesNo(SelectYesNoMsg),
    SelectOption(SelectOptionMsg),
    SelectCard(SelectCardMsg),
    SelectChain(SelectChainMsg),
    SelectPlace(SelectPlaceMsg),
    SelectPosition(SelectPositionMsg),
    SelectTribute(SelectCardMsg),
    SortChain(SortCardMsg),
    SelectCounter(SelectCounterMsg),
    SelectSum(SelectSumMsg),
    SelectDisField(SelectPlaceMsg),
    SortCard(SortCardMsg),
    SelectUnselectCard(SelectUnselectCardMsg),
    RockPaperScissors(RockPaperScissorsMsg),
    AnnounceRace(AnnounceMaskMsg),
    AnnounceAttrib(AnnounceMaskMsg),
    AnnounceCard(AnnounceCardMsg),
    AnnounceNumber(AnnounceNumberMsg),
    /// Any informational message the harness does not model.
    Other {
        identifier: u8,
    },
}

impl Message {
    /// The discriminant.
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Retry => MessageKind::Retry,
            Message::Hint { .. } => MessageKind::Hint,
            Message::Win { .. } => MessageKind::Win,
            Message::NewTurn { .. } => MessageKind::NewTurn,
            Message::NewPhase { .. } => MessageKind::NewPhase,
            Message::Draw { .. } => MessageKind::Draw,
            Message::SelectBattleCmd(_) => MessageKind::SelectBattleCmd,
            Message::SelectIdleCmd(_) => MessageKind::SelectIdleCmd,
            Message::SelectEffectYn(_) => MessageKind::SelectEffectYn,
            Message::SelectYesNo(_) => MessageKind::SelectYesNo,
            Message::SelectOption(_) => MessageKind::SelectOption,
            Message::SelectCard(_) => MessageKind::SelectCard,
            Message::SelectChain(_) => MessageKind::SelectChain,
            Message::SelectPlace(_) => MessageKind::SelectPlace,
            Message::SelectPosition(_) => MessageKind::SelectPosition,
            Message::SelectTribute(_) => MessageKind::SelectTribute,
            Message::SortChain(_) => MessageKind::SortChain,
            Message::SelectCounter(_) => MessageKind::SelectCounter,
            Message::SelectSum(_) => MessageKind::SelectSum,
            Message::SelectDisField(_) => MessageKind::SelectDisField,
            Message::SortCard(_) => MessageKind::SortCard,
            Message::SelectUnselectCard(_) => MessageKind::SelectUnselectCard,
            Message::RockPaperScissors(_) => MessageKind::RockPaperScissors,
            Message::AnnounceRace(_) => MessageKind::AnnounceRace,
            Message::AnnounceAttrib(_) => MessageKind::AnnounceAttrib,
            Message::AnnounceCard(_) => MessageKind::AnnounceCard,
            Message::AnnounceNumber(_) => MessageKind::AnnounceNumber,
            Message::Other { .. } => MessageKind::Other,
        }
    }

    /// Wire identifier.
    #[must_use]
    pub fn identifier(&self) -> u8 {
        match self {
            Message::Retry => MSG_RETRY,
            Message::Hint { .. } => MSG_HINT,
            Message::Win { .. } => MSG_WIN,
            Message::NewTurn { .. } => MSG_NEW_TURN,
            Message::NewPhase { .. } => MSG_NEW_PHASE,
            Message::Draw { .. } => MSG_DRAW,
            Message::SelectBattleCmd(_) => MSG_SELECT_BATTLECMD,
            Message::SelectIdleCmd(_) => MSG_SELECT_IDLECMD,
            Message::SelectEffectYn(_) => MSG_SELECT_EFFECTYN,
            Message::SelectYesNo(_) => MSG_SELECT_YESNO,
            Message::SelectOption(_) => MSG_SELECT_OPTION,
            Message::SelectCard(_) => MSG_SELECT_CARD,
            Message::SelectChain(_) => MSG_SELECT_CHAIN,
            Message::SelectPlace(_) => MSG_SELECT_PLACE,
            Message::SelectPosition(_) => MSG_SELECT_POSITION,
            Message::SelectTribute(_) => MSG_SELECT_TRIBUTE,
            Message::SortChain(_) => MSG_SORT_CHAIN,
            Message::SelectCounter(_) => MSG_SELECT_COUNTER,
            Message::SelectSum(_) => MSG_SELECT_SUM,
            Message::SelectDisField(_) => MSG_SELECT_DISFIELD,
            Message::SortCard(_) => MSG_SORT_CARD,
            Message::SelectUnselectCard(_) => MSG_SELECT_UNSELECT_CARD,
            Message::RockPaperScissors(_) => MSG_ROCK_PAPER_SCISSORS,
            Message::AnnounceRace(_) => MSG_ANNOUNCE_RACE,
            Message::AnnounceAttrib(_) => MSG_ANNOUNCE_ATTRIB,
            Message::AnnounceCard(_) => MSG_ANNOUNCE_CARD,
            Message::AnnounceNumber(_) => MSG_ANNOUNCE_NUMBER,
            Message::Other { identifier } => *identifier,
        }
    }

    /// Whether this message blocks for a response.
    #[must_use]
    pub fn is_response_capable(&self) -> bool {
        self.kind().is_response_capable()
    }

    /// The player who must answer, for response-capable messages.
    #[must_use]
    pub fn response_player(&self) -> Option<PlayerId> {
        let player = match self {
            Message::SelectBattleCmd(m) => m.player,
            Message::SelectIdleCmd(m) => m.player,
            Message::SelectEffectYn(m) => m.player,
            Message::SelectYesNo(m) => m.player,
            Message::SelectOption(m) => m.player,
            Message::SelectCard(m) | Message::SelectTribute(m) => m.player,
            Message::SelectChain(m) => m.player,
            Message::SelectPlace(m) | Message::SelectDisField(m) => m.player,
            Message::SelectPosition(m) => m.player,
            Message::SortChain(m) | Message::SortCard(m) => m.player,
            Message::SelectCounter(m) => m.player,
            Message::SelectSum(m) => m.player,
            Message::SelectUnselectCard(m) => m.player,
            Message::RockPaperScissors(m) => m.player,
            Message::AnnounceRace(m) | Message::AnnounceAttrib(m) => m.player,
            Message::AnnounceCard(m) => m.player,
            Message::AnnounceNumber(m) => m.player,
            _ => return None,
        };
        Some(player)
    }

    /// The trivial answer for this message, if one exists.
    ///
    /// Informational messages and card announcements have none.
    #[must_use]
    pub fn default_response(&self) -> Option<Response> {
        match self {
            Message::SelectBattleCmd(m) => m.default_response(),
            Message::SelectIdleCmd(m) => m.default_response(),
            Message::SelectEffectYn(m) => Some(m.prepare_response(false)),
            Message::SelectYesNo(m) => Some(m.prepare_response(false)),
            Message::SelectOption(m) => m.prepare_response(0).ok(),
            Message::SelectCard(m) | Message::SelectTribute(m) => m.default_response(),
            Message::SelectChain(m) => m.default_response(),
            Message::SelectPlace(m) | Message::SelectDisField(m) => m.default_response(),
            Message::SelectPosition(m) => m.default_response(),
            Message::SortChain(m) | Message::SortCard(m) => m.default_response(),
            Message::SelectCounter(m) => m.default_response(),
            Message::SelectSum(m) => m.default_response(),
            Message::SelectUnselectCard(m) => m.default_response(),
            Message::RockPaperScissors(m) => m.prepare_response(1).ok(),
            Message::AnnounceRace(m) | Message::AnnounceAttrib(m) => m.default_response(),
            Message::AnnounceNumber(m) => m.prepare_response(0).ok(),
            Message::AnnounceCard(_) => None,
            _ => None,
        }
    }
}
