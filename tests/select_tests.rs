//! Selection solver tests.
//!
//! Filter-driven card picks and the sum solver, checked on concrete prompts
//! and against a brute-force search.

use duel_harness::advancors::Advancor;
use duel_harness::core::{CardLocation, PlayerId};
use duel_harness::protocol::constants::{LOCATION_HAND, LOCATION_MZONE};
use duel_harness::protocol::{Candidate, Message, Response, SelectCardMsg, SelectSumMsg};
use duel_harness::select::sum::{self, exact_subset, MODE_THRESHOLD};
use duel_harness::select::{FilterQueue, SelectCardAdvancor, SelectionFilter};
use proptest::prelude::*;

fn hand(seq: u32) -> CardLocation {
    CardLocation::new(PlayerId::FIRST, LOCATION_HAND, seq)
}

fn select_card(codes: &[u32], min: u32, max: u32) -> Message {
    Message::SelectCard(SelectCardMsg {
        player: PlayerId::FIRST,
        cancelable: false,
        min,
        max,
        cards: codes
            .iter()
            .enumerate()
            .map(|(i, &code)| Candidate::new(code, hand(i as u32)))
            .collect(),
    })
}

fn sum_msg(mode: u8, sum_val: u32, min: u32, max: u32, weights: &[u32]) -> SelectSumMsg {
    SelectSumMsg {
        player: PlayerId::FIRST,
        mode,
        sum_val,
        min,
        max,
        must_select: Vec::new(),
        cards: weights
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                Candidate::new(200 + i as u32, CardLocation::new(PlayerId::FIRST, LOCATION_MZONE, i as u32))
                    .with_op_param(w)
            })
            .collect(),
    }
}

// =============================================================================
// Filter Queue Tests
// =============================================================================

#[test]
fn test_filters_pick_in_queue_order() {
    // Cards A, B, C; filters ask for B then A
    let msg = select_card(&[10, 11, 12], 1, 2);
    let mut policy = SelectCardAdvancor::new([hand(1), hand(0)]);

    let response = policy.advance(&msg).into_response().unwrap();
    assert_eq!(response, Response::from_bytes(&[2, 1, 0]));
    assert!(policy.queue().is_empty());
}

#[test]
fn test_filters_carry_over_between_prompts() {
    let mut policy = SelectCardAdvancor::new([10u32, 11]);

    // Only one card allowed: the second filter waits for the next prompt
    let first = policy.advance(&select_card(&[11, 10], 1, 1)).into_response();
    assert_eq!(first, Some(Response::from_bytes(&[1, 1])));
    assert_eq!(policy.queue().len(), 1);

    let second = policy.advance(&select_card(&[11, 12], 1, 1)).into_response();
    assert_eq!(second, Some(Response::from_bytes(&[1, 0])));
    assert!(policy.queue().is_empty());
}

#[test]
fn test_unmet_minimum_defers_and_keeps_queue() {
    let mut policy = SelectCardAdvancor::new([SelectionFilter::code(10)]);
    assert!(policy.advance(&select_card(&[10, 11], 2, 2)).is_deferred());
    assert_eq!(policy.queue().len(), 1);
}

#[test]
fn test_filter_fields_combine() {
    let filter = SelectionFilter::code(10).with_location(LOCATION_HAND).with_sequence(1);
    let queue: FilterQueue = [filter].into_iter().collect();
    let cards = [Candidate::new(10, hand(0)), Candidate::new(10, hand(1))];

    let matches = queue.tentative_matches(&cards, usize::MAX);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].item, 1);
}

// =============================================================================
// Sum Solver Tests
// =============================================================================

#[test]
fn test_exact_sum_with_must_select() {
    // Must-select weighs 4; one or two more cards must make up the remaining 6
    let mut msg = sum_msg(0, 10, 2, 3, &[3, 3, 4]);
    msg.must_select = vec![Candidate::new(1, hand(0)).with_op_param(4)];

    let plan = sum::plan(&msg, &FilterQueue::new()).unwrap();
    assert_eq!(plan.picks, vec![0, 1]);

    // Must-select slots lead the encoded answer
    let response = msg.prepare_response(&plan.picks).unwrap();
    assert_eq!(response.as_bytes(), &[3, 0, 0, 1]);
}

#[test]
fn test_sum_prompt_through_advancor() {
    let msg = Message::SelectSum(sum_msg(0, 5, 1, 2, &[1, 4, 5]));

    let mut plain = SelectCardAdvancor::new(std::iter::empty::<SelectionFilter>());
    assert_eq!(plain.advance(&msg).into_response(), Some(Response::from_bytes(&[1, 2])));

    // Claiming the 4 forces the 1 alongside it
    let mut claimed = SelectCardAdvancor::new([201u32]);
    assert_eq!(claimed.advance(&msg).into_response(), Some(Response::from_bytes(&[2, 1, 0])));
    assert!(claimed.queue().is_empty());
}

#[test]
fn test_threshold_keeps_claims_that_matter() {
    let msg = sum_msg(MODE_THRESHOLD, 7, 0, 0, &[3, 1, 4]);
    let queue: FilterQueue = [202u32].into_iter().collect();

    let plan = sum::plan(&msg, &queue).unwrap();
    // Claimed 4, then 3 fills the rest; both are needed
    assert_eq!(plan.picks, vec![2, 0]);
    assert_eq!(plan.consumed, vec![0]);
}

#[test]
fn test_threshold_keeps_early_fill() {
    // 3 + 5 reaches 6 and neither can be dropped; the 2 is never considered
    let msg = sum_msg(MODE_THRESHOLD, 6, 0, 0, &[3, 5, 2]);
    let plan = sum::plan(&msg, &FilterQueue::new()).unwrap();
    assert_eq!(plan.picks, vec![0, 1]);
}

#[test]
fn test_threshold_default_response() {
    let msg = sum_msg(MODE_THRESHOLD, 3, 0, 0, &[1, 1, 1, 1]);
    assert_eq!(msg.default_response().unwrap().as_bytes(), &[3, 0, 1, 2]);
}

// =============================================================================
// Property Tests
// =============================================================================

/// Smallest subset size in `[min, max]` hitting `target`, by enumeration.
fn brute_force_min_count(weights: &[u32], target: u32, min: usize, max: usize) -> Option<usize> {
    (0u32..1u32 << weights.len())
        .filter(|mask| {
            let total: u32 = (0..weights.len())
                .filter(|&i| mask & (1u32 << i) != 0)
                .map(|i| weights[i])
                .sum();
            let count = mask.count_ones() as usize;
            total == target && count >= min && count <= max
        })
        .map(|mask| mask.count_ones() as usize)
        .min()
}

proptest! {
    #[test]
    fn prop_threshold_selection_is_minimal(
        weights in prop::collection::vec(1u32..20, 1..8),
        must_weights in prop::collection::vec(1u32..20, 0..3),
        claimed in prop::collection::vec(any::<bool>(), 8),
        target in 1u32..60,
    ) {
        let mut msg = sum_msg(MODE_THRESHOLD, target, 0, 0, &weights);
        msg.must_select = must_weights
            .iter()
            .enumerate()
            .map(|(i, &w)| Candidate::new(900 + i as u32, hand(i as u32)).with_op_param(w))
            .collect();
        let claims: Vec<usize> = (0..weights.len()).filter(|&i| claimed[i]).collect();
        let queue: FilterQueue = claims.iter().map(|&i| 200 + i as u32).collect();

        let must_sum: u32 = must_weights.iter().sum();
        let available: u32 = must_sum + weights.iter().sum::<u32>();

        match sum::plan(&msg, &queue) {
            Some(plan) => {
                // Picks index the offered cards only, each at most once
                let mut distinct = plan.picks.clone();
                distinct.sort_unstable();
                distinct.dedup();
                prop_assert_eq!(distinct.len(), plan.picks.len());
                prop_assert!(plan.picks.iter().all(|&i| i < weights.len()));

                let total = must_sum + plan.picks.iter().map(|&i| weights[i]).sum::<u32>();
                prop_assert!(total >= target);
                for &i in &plan.picks {
                    prop_assert!(total - weights[i] < target);
                }

                // Consumed filters are exactly the claims that survived
                let surviving: Vec<usize> = claims
                    .iter()
                    .enumerate()
                    .filter(|&(_, item)| plan.picks.contains(item))
                    .map(|(pos, _)| pos)
                    .collect();
                prop_assert_eq!(plan.consumed, surviving);
            }
            None => prop_assert!(available < target),
        }
    }

    #[test]
    fn prop_exact_sum_matches_brute_force(
        weights in prop::collection::vec(0u32..10, 0..8),
        target in 0u32..30,
        min in 0u32..4,
        extra in 0u32..5,
    ) {
        let max = min + extra;
        let msg = sum_msg(0, target, min, max, &weights);
        let expected = brute_force_min_count(&weights, target, min as usize, max as usize);

        match sum::plan(&msg, &FilterQueue::new()) {
            Some(plan) => {
                let total: u32 = plan.picks.iter().map(|&i| weights[i]).sum();
                prop_assert_eq!(total, target);
                prop_assert_eq!(Some(plan.picks.len()), expected);

                let mut distinct = plan.picks.clone();
                distinct.sort_unstable();
                distinct.dedup();
                prop_assert_eq!(distinct.len(), plan.picks.len());
            }
            None => prop_assert_eq!(expected, None),
        }
    }

    #[test]
    fn prop_exact_subset_respects_bounds(
        weights in prop::collection::vec(0u64..12, 0..10),
        target in 0u64..40,
        min in 0usize..5,
        max in 0usize..8,
    ) {
        let pool: Vec<(usize, u64)> = weights.iter().copied().enumerate().collect();
        if let Some(chosen) = exact_subset(&pool, target, min, max) {
            prop_assert!(chosen.len() >= min && chosen.len() <= max);
            prop_assert_eq!(chosen.iter().map(|&i| weights[i]).sum::<u64>(), target);
            prop_assert!(chosen.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
