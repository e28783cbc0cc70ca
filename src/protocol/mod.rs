//! Message/response protocol surface.
//!
//! The engine emits decoded `Message`s; response-capable ones block until
//! a `Response` is supplied. This module models the messages the harness
//! answers, their candidate lists, and how answers are encoded.

pub mod constants;
pub mod response;
pub mod card;
pub mod prompts;
pub mod message;

pub use response::Response;
pub use card::{position_of, AttackableCard, Candidate, CommandCard, CounterCard, Located, Place};
pub use prompts::{
    AnnounceCardMsg, AnnounceMaskMsg, AnnounceNumberMsg, BattleCmdType, IdleCmdType,
    RockPaperScissorsMsg, SelectBattleCmdMsg, SelectCardMsg, SelectChainMsg, SelectCounterMsg,
    SelectEffectYnMsg, SelectIdleCmdMsg, SelectOptionMsg, SelectPlaceMsg, SelectPositionMsg,
    SelectSumMsg, SelectUnselectCardMsg, SelectYesNoMsg, SortCardMsg,
};
pub use message::{Message, MessageKind};
