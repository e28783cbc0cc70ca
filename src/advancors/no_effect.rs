//! Declining optional chains.

use crate::protocol::{Message, MessageKind};

use super::{Advancor, MapAdvancor, PolicyResult};

/// Passes on chain prompts that offer nothing to activate.
///
/// Any other message, or a chain prompt with candidates, defers.
#[derive(Debug)]
pub struct NoEffectAdvancor {
    inner: MapAdvancor<'static>,
}

impl NoEffectAdvancor {
    pub fn new() -> Self {
        let inner = MapAdvancor::new().with_handler(MessageKind::SelectChain, |msg| match msg {
            Message::SelectChain(m) if m.chains.is_empty() => m.prepare_response(None).ok(),
            _ => None,
        });
        Self { inner }
    }
}

impl Default for NoEffectAdvancor {
    fn default() -> Self {
        Self::new()
    }
}

impl Advancor for NoEffectAdvancor {
    fn advance(&mut self, msg: &Message) -> PolicyResult {
        self.inner.advance(msg)
    }
}
