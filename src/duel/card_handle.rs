//! Card-centric response building.
//!
//! A `CardHandle` pairs a card's location and queried state with the
//! message the duel is waiting on, so scenarios can say "summon this card"
//! instead of hunting for its index in the right command list.
//!
//! Operations fail with `UnsupportedMessage` when the pending message has no
//! such action at all, and with `NotSelectable` when the action exists but
//! this card is not offered for it. The `can_*` forms turn `NotSelectable`
//! into `false` but still report `UnsupportedMessage`.

use crate::core::{CardLocation, HarnessError, Result};
use crate::engine::CardInfo;
use crate::protocol::{
    position_of, BattleCmdType, IdleCmdType, Located, Message, Response,
};

/// A card on the field, viewed against the pending message.
#[derive(Clone, Debug)]
pub struct CardHandle<'t> {
    location: CardLocation,
    info: CardInfo,
    message: Option<&'t Message>,
}

impl<'t> CardHandle<'t> {
    pub(crate) fn new(location: CardLocation, info: CardInfo, message: Option<&'t Message>) -> Self {
        Self {
            location,
            info,
            message,
        }
    }

    pub fn location(&self) -> CardLocation {
        self.location
    }

    /// Card state as of the query.
    pub fn info(&self) -> &CardInfo {
        &self.info
    }

    // =========================================================================
    // Main phase
    // =========================================================================

    pub fn summon(&self) -> Result<Response> {
        self.idle_cmd("summon", IdleCmdType::Summon, None)
    }

    pub fn can_summon(&self) -> Result<bool> {
        possible(self.summon())
    }

    pub fn special_summon(&self) -> Result<Response> {
        self.idle_cmd("special_summon", IdleCmdType::SpSummon, None)
    }

    pub fn can_special_summon(&self) -> Result<bool> {
        possible(self.special_summon())
    }

    pub fn mset(&self) -> Result<Response> {
        self.idle_cmd("mset", IdleCmdType::Mset, None)
    }

    pub fn can_mset(&self) -> Result<bool> {
        possible(self.mset())
    }

    pub fn sset(&self) -> Result<Response> {
        self.idle_cmd("sset", IdleCmdType::Sset, None)
    }

    pub fn can_sset(&self) -> Result<bool> {
        possible(self.sset())
    }

    pub fn change_position(&self) -> Result<Response> {
        self.idle_cmd("change_position", IdleCmdType::Repos, None)
    }

    pub fn can_change_position(&self) -> Result<bool> {
        possible(self.change_position())
    }

    // =========================================================================
    // Effects and battle
    // =========================================================================

    /// Activate an effect of this card.
    ///
    /// Works on idle and battle commands, chain prompts and optional-effect
    /// prompts. `desc` picks one effect when the card has several.
    pub fn activate(&self, desc: Option<u32>) -> Result<Response> {
        match self.message {
            Some(Message::SelectIdleCmd(_)) => self.idle_cmd("activate", IdleCmdType::Activate, desc),
            Some(Message::SelectBattleCmd(m)) => m
                .prepare_response(BattleCmdType::Activate, Some(self.location), desc)
                .map_err(|_| HarnessError::NotSelectable),
            Some(Message::SelectChain(m)) => m.prepare_response_at(self.location, desc),
            Some(Message::SelectEffectYn(m)) => {
                let matches = m.card_location() == self.location && desc.is_none_or(|d| d == m.desc);
                if matches {
                    Ok(m.prepare_response(true))
                } else {
                    Err(HarnessError::NotSelectable)
                }
            }
            _ => Err(self.unsupported("activate")),
        }
    }

    pub fn can_activate(&self, desc: Option<u32>) -> Result<bool> {
        possible(self.activate(desc))
    }

    pub fn perform_attack(&self) -> Result<Response> {
        match self.message {
            Some(Message::SelectBattleCmd(m)) => m
                .prepare_response(BattleCmdType::Attack, Some(self.location), None)
                .map_err(|_| HarnessError::NotSelectable),
            _ => Err(self.unsupported("perform_attack")),
        }
    }

    pub fn can_perform_attack(&self) -> Result<bool> {
        possible(self.perform_attack())
    }

    /// Whether this card may attack directly.
    pub fn can_direct_attack(&self) -> Result<bool> {
        match self.message {
            Some(Message::SelectBattleCmd(m)) => Ok(m
                .attackable
                .iter()
                .any(|a| a.card_location() == self.location && a.direct_attack)),
            _ => Err(self.unsupported("can_direct_attack")),
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select only this card.
    pub fn select(&self) -> Result<Response> {
        match self.message {
            Some(Message::SelectCard(m)) | Some(Message::SelectTribute(m)) => {
                let index = position_of(&m.cards, self.location).ok_or(HarnessError::NotSelectable)?;
                Response::index_list(&[index])
            }
            Some(Message::SelectUnselectCard(m)) => {
                let index = m
                    .selectable
                    .iter()
                    .chain(&m.unselectable)
                    .position(|c| c.card_location() == self.location)
                    .ok_or(HarnessError::NotSelectable)?;
                m.prepare_response(Some(index))
            }
            Some(Message::SelectSum(m)) => {
                let index = position_of(&m.cards, self.location).ok_or(HarnessError::NotSelectable)?;
                m.prepare_response(&[index])
            }
            _ => Err(self.unsupported("select")),
        }
    }

    pub fn can_select(&self) -> Result<bool> {
        possible(self.select())
    }

    fn idle_cmd(&self, operation: &'static str, cmd: IdleCmdType, desc: Option<u32>) -> Result<Response> {
        match self.message {
            Some(Message::SelectIdleCmd(m)) => m
                .prepare_response(cmd, Some(self.location), desc)
                .map_err(|_| HarnessError::NotSelectable),
            _ => Err(self.unsupported(operation)),
        }
    }

    fn unsupported(&self, operation: &'static str) -> HarnessError {
        HarnessError::UnsupportedMessage {
            operation,
            kind: self
                .message
                .map_or_else(|| "none".to_string(), |m| m.kind().to_string()),
        }
    }
}

impl Located for CardHandle<'_> {
    fn code(&self) -> u32 {
        self.info.code
    }

    fn card_location(&self) -> CardLocation {
        self.location
    }
}

fn possible(attempt: Result<Response>) -> Result<bool> {
    match attempt {
        Ok(_) => Ok(true),
        Err(err @ HarnessError::UnsupportedMessage { .. }) => Err(err),
        Err(_) => Ok(false),
    }
}
