//! Driving a duel under test.
//!
//! [`DuelTester`] runs the engine loop, [`Checkpoint`] is what scenario code
//! returns when it stops to look at a message, and [`CardHandle`] builds
//! answers from a card's point of view.

mod card_handle;
mod checkpoint;
mod tester;

pub use card_handle::CardHandle;
pub use checkpoint::Checkpoint;
pub use tester::{with_duel_tester, DuelPhase, DuelTester};
