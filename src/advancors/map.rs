//! Dispatch by message kind.

use rustc_hash::FxHashMap;

use crate::protocol::{Message, MessageKind, Response};

use super::{Advancor, PolicyResult};

/// A per-kind handler. `None` defers.
pub type Handler<'a> = Box<dyn FnMut(&Message) -> Option<Response> + 'a>;

/// Routes each message to the handler registered for its kind.
///
/// Unregistered kinds defer; there is no fallback. Registering a second
/// handler for the same kind replaces the first.
#[derive(Default)]
pub struct MapAdvancor<'a> {
    handlers: FxHashMap<MessageKind, Handler<'a>>,
}

impl<'a> MapAdvancor<'a> {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Register a handler (builder pattern).
    pub fn with_handler(
        mut self,
        kind: MessageKind,
        handler: impl FnMut(&Message) -> Option<Response> + 'a,
    ) -> Self {
        self.insert(kind, handler);
        self
    }

    /// Register a handler.
    pub fn insert(&mut self, kind: MessageKind, handler: impl FnMut(&Message) -> Option<Response> + 'a) {
        self.handlers.insert(kind, Box::new(handler));
    }

    /// Whether `kind` has a handler.
    pub fn handles(&self, kind: MessageKind) -> bool {
        self.handlers.contains_key(&kind)
    }
}

impl Advancor for MapAdvancor<'_> {
    fn advance(&mut self, msg: &Message) -> PolicyResult {
        match self.handlers.get_mut(&msg.kind()) {
            Some(handler) => handler(msg).into(),
            None => PolicyResult::Deferred,
        }
    }
}

impl std::fmt::Debug for MapAdvancor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.handlers.keys().collect();
        kinds.sort();
        f.debug_struct("MapAdvancor").field("kinds", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::protocol::{SelectChainMsg, SelectYesNoMsg};

    fn yes_no() -> Message {
        Message::SelectYesNo(SelectYesNoMsg {
            player: PlayerId::FIRST,
            desc: 0,
        })
    }

    #[test]
    fn test_dispatches_by_kind() {
        let mut map = MapAdvancor::new().with_handler(MessageKind::SelectYesNo, |m| match m {
            Message::SelectYesNo(m) => Some(m.prepare_response(true)),
            _ => None,
        });

        assert_eq!(map.advance(&yes_no()).into_response(), Some(Response::from_i32(1)));

        let chain = Message::SelectChain(SelectChainMsg::default());
        assert!(map.advance(&chain).is_deferred());
    }

    #[test]
    fn test_later_registration_overrides() {
        let mut map = MapAdvancor::new()
            .with_handler(MessageKind::SelectYesNo, |_| Some(Response::from_i32(1)))
            .with_handler(MessageKind::SelectYesNo, |_| Some(Response::from_i32(0)));

        assert_eq!(map.advance(&yes_no()).into_response(), Some(Response::from_i32(0)));
    }

    #[test]
    fn test_handler_none_defers() {
        let mut map = MapAdvancor::new().with_handler(MessageKind::SelectYesNo, |_| None);
        assert!(map.handles(MessageKind::SelectYesNo));
        assert!(map.advance(&yes_no()).is_deferred());
    }
}
