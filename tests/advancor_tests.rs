//! Advancor combinator tests.
//!
//! Covers composition order, limits, per-player views and the fixed
//! response sequence, on hand-built messages.

use duel_harness::advancors::{
    advancor_fn, Advancor, AdvancorExt, CombinedAdvancor, DefaultAdvancor,
    DefaultResponseAdvancor, MapAdvancor, NoEffectAdvancor, PolicyResult, StaticAdvancor,
};
use duel_harness::core::{CardLocation, PlayerId};
use duel_harness::protocol::constants::LOCATION_HAND;
use duel_harness::protocol::{
    CommandCard, Message, MessageKind, Response, SelectChainMsg, SelectIdleCmdMsg, SelectYesNoMsg,
};
use proptest::prelude::*;

fn yes_no(player: PlayerId) -> Message {
    Message::SelectYesNo(SelectYesNoMsg { player, desc: 0 })
}

fn chain(forced: bool, chains: Vec<CommandCard>) -> Message {
    Message::SelectChain(SelectChainMsg {
        player: PlayerId::FIRST,
        spe_count: 0,
        forced,
        chains,
    })
}

fn idle() -> Message {
    Message::SelectIdleCmd(SelectIdleCmdMsg {
        player: PlayerId::FIRST,
        can_end: true,
        ..Default::default()
    })
}

// =============================================================================
// Composition Tests
// =============================================================================

#[test]
fn test_combined_first_answer_wins() {
    let mut first_calls = 0;
    let mut second_calls = 0;
    {
        let mut policy = CombinedAdvancor::new()
            .with(advancor_fn(|_: &Message| {
                first_calls += 1;
                None::<Response>
            }))
            .with(advancor_fn(|_: &Message| {
                second_calls += 1;
                Response::from_i32(1)
            }))
            .with(advancor_fn(|_: &Message| -> Response { panic!("never reached") }));

        assert_eq!(
            policy.advance(&yes_no(PlayerId::FIRST)),
            PolicyResult::Responded(Response::from_i32(1))
        );
    }
    assert_eq!(first_calls, 1);
    assert_eq!(second_calls, 1);
}

#[test]
fn test_empty_combination_defers() {
    let mut policy = CombinedAdvancor::new();
    assert!(policy.is_empty());
    assert!(policy.advance(&idle()).is_deferred());
}

#[test]
fn test_no_effect_then_default() {
    let mut policy = NoEffectAdvancor::new().or(DefaultResponseAdvancor);

    // Empty optional chain: pass
    assert_eq!(
        policy.advance(&chain(false, vec![])).into_response(),
        Some(Response::from_i32(-1))
    );

    // Idle command: the fallback ends the turn
    assert_eq!(policy.advance(&idle()).into_response(), Some(Response::from_i32(7)));
}

#[test]
fn test_no_effect_leaves_offered_chains() {
    let at = CardLocation::new(PlayerId::FIRST, LOCATION_HAND, 0);
    let mut policy = NoEffectAdvancor::new();
    assert!(policy.advance(&chain(false, vec![CommandCard::new(5, at)])).is_deferred());
}

#[test]
fn test_map_advancor_dispatches_by_kind() {
    let mut policy = MapAdvancor::new()
        .with_handler(MessageKind::SelectYesNo, |_| Some(Response::from_i32(1)));

    assert!(policy.handles(MessageKind::SelectYesNo));
    assert!(policy.advance(&yes_no(PlayerId::FIRST)).is_responded());
    assert!(policy.advance(&idle()).is_deferred());
}

#[test]
fn test_default_advancor_overrides_and_player() {
    let mut policy = DefaultAdvancor::new()
        .with_player(PlayerId::SECOND)
        .with_handler(MessageKind::SelectYesNo, |_| Some(Response::from_i32(1)));

    // Wrong player
    assert!(policy.advance(&yes_no(PlayerId::FIRST)).is_deferred());
    // Override beats the default "no"
    assert_eq!(
        policy.advance(&yes_no(PlayerId::SECOND)).into_response(),
        Some(Response::from_i32(1))
    );
}

#[test]
fn test_for_player_view() {
    let mut policy = DefaultResponseAdvancor.for_player(PlayerId::SECOND);
    assert!(policy.advance(&yes_no(PlayerId::FIRST)).is_deferred());
    assert!(policy.advance(&yes_no(PlayerId::SECOND)).is_responded());
}

#[test]
fn test_boxed_advancors_compose() {
    let policies = vec![
        DefaultResponseAdvancor.once().boxed(),
        StaticAdvancor::new([Response::from_i32(3)]).boxed(),
    ];
    let mut policy = CombinedAdvancor::from(policies);

    assert_eq!(policy.len(), 2);
    assert_eq!(
        policy.advance(&yes_no(PlayerId::FIRST)).into_response(),
        Some(Response::from_i32(0))
    );
    assert_eq!(
        policy.advance(&yes_no(PlayerId::FIRST)).into_response(),
        Some(Response::from_i32(3))
    );
    assert!(policy.advance(&yes_no(PlayerId::FIRST)).is_deferred());
}

#[test]
fn test_limit_ignores_deferrals() {
    let mut asked = 0;
    let mut policy = advancor_fn(|_: &Message| {
        asked += 1;
        (asked % 2 == 0).then(|| Response::from_i32(asked))
    })
    .limit(2);
    let msg = yes_no(PlayerId::FIRST);

    let answers: Vec<_> = (0..6).filter_map(|_| policy.advance(&msg).into_response()).collect();
    assert_eq!(answers, vec![Response::from_i32(2), Response::from_i32(4)]);
    assert_eq!(policy.remaining(), 0);
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #[test]
    fn prop_limit_answers_at_most_n(limit in 0usize..8, asks in 0usize..16) {
        let mut policy = DefaultResponseAdvancor.limit(limit);
        let msg = yes_no(PlayerId::FIRST);

        let answered = (0..asks).filter(|_| policy.advance(&msg).is_responded()).count();
        prop_assert_eq!(answered, limit.min(asks));
        prop_assert_eq!(policy.remaining(), limit - limit.min(asks));
    }

    #[test]
    fn prop_static_replays_in_order(values in prop::collection::vec(any::<i32>(), 0..12)) {
        let mut policy = StaticAdvancor::new(values.iter().map(|&v| Response::from_i32(v)));
        let msg = yes_no(PlayerId::FIRST);

        for &v in &values {
            prop_assert_eq!(policy.advance(&msg).into_response(), Some(Response::from_i32(v)));
        }
        prop_assert!(policy.advance(&msg).is_deferred());
        prop_assert!(policy.is_exhausted());
    }
}
