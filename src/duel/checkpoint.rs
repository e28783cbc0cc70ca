//! What scenario code returns from a checkpoint.

use crate::advancors::Advancor;
use crate::protocol::Response;

/// What a checkpoint callback wants done with the pending message.
pub enum Checkpoint<'a> {
    /// Keep going with this advancor; it answers the pending message first.
    Advance(Box<dyn Advancor + 'a>),
    /// Answer the pending message with these bytes, then stop at the next prompt.
    Respond(Response),
    /// Leave the message pending.
    Stop,
}

impl<'a> Checkpoint<'a> {
    /// Continue with `advancor`.
    pub fn advance(advancor: impl Advancor + 'a) -> Self {
        Checkpoint::Advance(Box::new(advancor))
    }
}

impl From<Response> for Checkpoint<'_> {
    fn from(response: Response) -> Self {
        Checkpoint::Respond(response)
    }
}

impl From<Option<Response>> for Checkpoint<'_> {
    fn from(response: Option<Response>) -> Self {
        response.map_or(Checkpoint::Stop, Checkpoint::Respond)
    }
}

impl std::fmt::Debug for Checkpoint<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Checkpoint::Advance(_) => f.write_str("Advance(..)"),
            Checkpoint::Respond(response) => f.debug_tuple("Respond").field(response).finish(),
            Checkpoint::Stop => f.write_str("Stop"),
        }
    }
}
