//! Sum selection solver.
//!
//! Sum prompts ask for a subset of cards whose weights add up to a target.
//! Cards the engine already selected (`must_select`) count toward the sum
//! and the card count but are never chosen here.
//!
//! Two modes:
//! - **Threshold** (`mode == 1`): reach at least the target with a subset
//!   from which no single card can be dropped.
//! - **Exact** (any other mode): hit the target exactly, with the total card
//!   count inside `[min, max]`.
//!
//! In both modes queued filters claim cards first; the solver completes the
//! selection around those claims.

use rustc_hash::FxHashMap;

use crate::protocol::SelectSumMsg;

use super::filter::{FilterMatch, FilterQueue};

/// Mode value for "at least the target".
pub const MODE_THRESHOLD: u8 = 1;

const OP_PARAM_PACKED_FLAG: u32 = 0x8000_0000;

/// A card's contribution to a sum prompt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Weight {
    pub amount: u32,
    /// Alternate weight some cards may count as instead.
    pub extra: u32,
}

/// Decode a packed `op_param`.
///
/// With the high bit set, the low 31 bits are the amount and there is no
/// alternate. Otherwise the low 16 bits are the amount and the high 16 bits
/// the alternate.
///
/// ```
/// use duel_harness::select::sum::decode_op_param;
///
/// assert_eq!(decode_op_param(0x0002_0004).amount, 4);
/// assert_eq!(decode_op_param(0x0002_0004).extra, 2);
/// assert_eq!(decode_op_param(0x8001_0000).amount, 0x1_0000);
/// ```
pub fn decode_op_param(op_param: u32) -> Weight {
    if op_param & OP_PARAM_PACKED_FLAG != 0 {
        Weight {
            amount: op_param & !OP_PARAM_PACKED_FLAG,
            extra: 0,
        }
    } else {
        Weight {
            amount: op_param & 0xffff,
            extra: op_param >> 16,
        }
    }
}

/// A solved sum prompt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SumPlan {
    /// Chosen indices into `cards`. Filter claims first, then solver picks.
    pub picks: Vec<usize>,
    /// Queue positions of the filters whose claims survived.
    pub consumed: Vec<usize>,
}

/// Solve a sum prompt, honoring queued filters.
///
/// Returns `None` when no valid selection exists given the filter claims.
/// The queue is only read; commit with `FilterQueue::consume(&plan.consumed)`.
pub fn plan(msg: &SelectSumMsg, filters: &FilterQueue) -> Option<SumPlan> {
    let amounts: Vec<u64> = msg
        .cards
        .iter()
        .map(|c| u64::from(decode_op_param(c.op_param).amount))
        .collect();
    let must_sum: u64 = msg
        .must_select
        .iter()
        .map(|c| u64::from(decode_op_param(c.op_param).amount))
        .sum();
    let claims = filters.tentative_matches(&msg.cards, usize::MAX);

    let picks = if msg.mode == MODE_THRESHOLD {
        plan_threshold(msg, &amounts, must_sum, &claims)?
    } else {
        plan_exact(msg, &amounts, must_sum, &claims)?
    };

    let consumed = claims
        .iter()
        .filter(|m| picks.contains(&m.item))
        .map(|m| m.filter)
        .collect();

    Some(SumPlan { picks, consumed })
}

fn plan_threshold(
    msg: &SelectSumMsg,
    amounts: &[u64],
    must_sum: u64,
    claims: &[FilterMatch],
) -> Option<Vec<usize>> {
    let target = u64::from(msg.sum_val);
    let mut taken = vec![false; amounts.len()];
    let mut picked: Vec<usize> = Vec::with_capacity(amounts.len());
    for m in claims {
        taken[m.item] = true;
        picked.push(m.item);
    }
    let mut total = must_sum + picked.iter().map(|&i| amounts[i]).sum::<u64>();

    // Fill left to right
    for (i, &amount) in amounts.iter().enumerate() {
        if total >= target {
            break;
        }
        if !taken[i] {
            taken[i] = true;
            picked.push(i);
            total += amount;
        }
    }
    if total < target {
        return None;
    }

    // Drop surplus from the most recently added end
    for pos in (0..picked.len()).rev() {
        let amount = amounts[picked[pos]];
        if total - amount >= target {
            total -= amount;
            picked.remove(pos);
        }
    }

    let minimal = picked.iter().all(|&i| total - amounts[i] < target);
    minimal.then_some(picked)
}

fn plan_exact(
    msg: &SelectSumMsg,
    amounts: &[u64],
    must_sum: u64,
    claims: &[FilterMatch],
) -> Option<Vec<usize>> {
    let must_count = msg.must_select.len() as i64;
    let target = i64::from(msg.sum_val);

    let sum_left = target - must_sum as i64;
    let min_left = (i64::from(msg.min) - must_count).max(0);
    let max_left = (i64::from(msg.max) - must_count).max(0);
    if sum_left < 0 {
        return None;
    }

    let mut taken = vec![false; amounts.len()];
    let pre: Vec<usize> = claims.iter().map(|m| m.item).collect();
    for &i in &pre {
        taken[i] = true;
    }
    let pre_sum: i64 = pre.iter().map(|&i| amounts[i] as i64).sum();
    let pre_count = pre.len() as i64;

    let sum_need = sum_left - pre_sum;
    if sum_need < 0 || pre_count > max_left {
        return None;
    }
    let min_need = (min_left - pre_count).max(0) as usize;
    let max_need = (max_left - pre_count) as usize;
    let sum_need = sum_need as u64;

    let pool: Vec<(usize, u64)> = amounts
        .iter()
        .enumerate()
        .filter(|&(i, &amount)| !taken[i] && amount <= sum_need)
        .map(|(i, &amount)| (i, amount))
        .collect();

    let extra = exact_subset(&pool, sum_need, min_need, max_need)?;

    let mut picks = pre;
    picks.extend(extra);

    let count = must_count + picks.len() as i64;
    let total = must_sum + picks.iter().map(|&i| amounts[i]).sum::<u64>();
    let valid = count >= i64::from(msg.min)
        && count <= i64::from(msg.max)
        && total == u64::from(msg.sum_val);
    valid.then_some(picks)
}

type Reach = (u64, usize);

/// Find a subset of `pool` summing to exactly `target` with a size in
/// `[min_count, max_count]`.
///
/// `pool` holds `(index, weight)` pairs; the returned indices come from it in
/// pool order. Among valid sizes the smallest wins. For a given
/// `(sum, size)`, the first subset discovered while scanning the pool in
/// order is the one returned.
pub fn exact_subset(
    pool: &[(usize, u64)],
    target: u64,
    min_count: usize,
    max_count: usize,
) -> Option<Vec<usize>> {
    let root: Reach = (0, 0);
    let mut links: FxHashMap<Reach, Option<(Reach, usize)>> = FxHashMap::default();
    let mut order: Vec<Reach> = vec![root];
    links.insert(root, None);

    for &(index, weight) in pool {
        // Only states reached before this card may extend with it
        let reached = order.len();
        for k in 0..reached {
            let (sum, count) = order[k];
            let next = (sum + weight, count + 1);
            if next.0 > target || next.1 > max_count || links.contains_key(&next) {
                continue;
            }
            links.insert(next, Some(((sum, count), index)));
            order.push(next);
        }
    }

    let goal = (min_count..=max_count).map(|c| (target, c)).find(|r| links.contains_key(r))?;

    let mut chosen = Vec::with_capacity(goal.1);
    let mut cursor = goal;
    while let Some(&Some((prev, index))) = links.get(&cursor) {
        chosen.push(index);
        cursor = prev;
    }
    chosen.reverse();
    Some(chosen)
}
