//! Response policies ("advancors") and their combinators.
//!
//! An advancor looks at one outstanding message and either answers it or
//! defers. Deferring is not a failure: it hands the decision to the next
//! advancor in a combinator, or back to the test author once the duel loop
//! stops.
//!
//! ## Composition
//!
//! Advancors are plain values implementing [`Advancor`]. Stateful ones
//! (limits, replays, filter queues) own their state, so the same instance can
//! be lent to several `advance` calls through `&mut`:
//!
//! ```
//! use duel_harness::advancors::{Advancor, AdvancorExt, DefaultResponseAdvancor, NoEffectAdvancor};
//!
//! let mut policy = NoEffectAdvancor::new().or(DefaultResponseAdvancor);
//! let _: &mut dyn Advancor = &mut policy;
//! ```

mod combined;
mod default;
mod limit;
mod map;
mod no_effect;
mod player_view;
mod static_seq;
mod summon_place;

pub use combined::CombinedAdvancor;
pub use default::{DefaultAdvancor, DefaultResponseAdvancor};
pub use limit::LimitAdvancor;
pub use map::{Handler, MapAdvancor};
pub use no_effect::NoEffectAdvancor;
pub use player_view::PlayerViewAdvancor;
pub use static_seq::StaticAdvancor;
pub use summon_place::{PlaceFilter, SummonPlaceAdvancor};

use crate::core::PlayerId;
use crate::protocol::{Message, Response};

/// Outcome of asking an advancor about one message.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PolicyResult {
    /// Send these bytes to the engine.
    Responded(Response),
    /// No opinion.
    Deferred,
}

impl PolicyResult {
    pub fn is_responded(&self) -> bool {
        matches!(self, PolicyResult::Responded(_))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, PolicyResult::Deferred)
    }

    /// The response, if any.
    pub fn into_response(self) -> Option<Response> {
        match self {
            PolicyResult::Responded(response) => Some(response),
            PolicyResult::Deferred => None,
        }
    }

    /// Keep a response, or ask `next` on deferral.
    pub fn or_else(self, next: impl FnOnce() -> PolicyResult) -> PolicyResult {
        match self {
            PolicyResult::Responded(_) => self,
            PolicyResult::Deferred => next(),
        }
    }
}

impl From<Option<Response>> for PolicyResult {
    fn from(response: Option<Response>) -> Self {
        response.map_or(PolicyResult::Deferred, PolicyResult::Responded)
    }
}

impl From<Response> for PolicyResult {
    fn from(response: Response) -> Self {
        PolicyResult::Responded(response)
    }
}

/// A response policy.
///
/// Called at most once per outstanding message per advance cycle. Any state
/// an implementation keeps must be its own.
pub trait Advancor {
    /// Answer `msg`, or defer.
    fn advance(&mut self, msg: &Message) -> PolicyResult;
}

impl<A: Advancor + ?Sized> Advancor for &mut A {
    fn advance(&mut self, msg: &Message) -> PolicyResult {
        (**self).advance(msg)
    }
}

impl<A: Advancor + ?Sized> Advancor for Box<A> {
    fn advance(&mut self, msg: &Message) -> PolicyResult {
        (**self).advance(msg)
    }
}

/// Closure adapter; see [`advancor_fn`].
#[derive(Clone, Debug)]
pub struct FnAdvancor<F> {
    f: F,
}

impl<F, R> Advancor for FnAdvancor<F>
where
    F: FnMut(&Message) -> R,
    R: Into<PolicyResult>,
{
    fn advance(&mut self, msg: &Message) -> PolicyResult {
        (self.f)(msg).into()
    }
}

/// Turn a closure into an advancor.
///
/// The closure may return a `PolicyResult`, a `Response`, or an
/// `Option<Response>` (`None` defers).
pub fn advancor_fn<F, R>(f: F) -> FnAdvancor<F>
where
    F: FnMut(&Message) -> R,
    R: Into<PolicyResult>,
{
    FnAdvancor { f }
}

/// Combinator shorthands available on every advancor.
pub trait AdvancorExt: Advancor + Sized {
    /// Try `self`, then `next`.
    fn or<'a, B>(self, next: B) -> CombinedAdvancor<'a>
    where
        Self: 'a,
        B: Advancor + 'a,
    {
        CombinedAdvancor::new().with(self).with(next)
    }

    /// Answer at most `limit` times.
    fn limit(self, limit: usize) -> LimitAdvancor<Self> {
        LimitAdvancor::new(self, limit)
    }

    /// Answer at most once.
    fn once(self) -> LimitAdvancor<Self> {
        LimitAdvancor::once(self)
    }

    /// Only answer prompts addressed to `player`.
    fn for_player(self, player: PlayerId) -> PlayerViewAdvancor<Self> {
        PlayerViewAdvancor::new(player, self)
    }

    /// Erase the concrete type.
    fn boxed<'a>(self) -> Box<dyn Advancor + 'a>
    where
        Self: 'a,
    {
        Box::new(self)
    }
}

impl<A: Advancor> AdvancorExt for A {}
