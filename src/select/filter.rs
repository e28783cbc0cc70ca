//! Selection filters and the filter queue.
//!
//! A `SelectionFilter` expresses test intent ("pick the card with this
//! code") independent of where the engine happens to list that card. A
//! `FilterQueue` holds those intents in priority order across many prompts.
//!
//! Matching is two-phase: `tentative_matches` only reads the queue, and
//! `consume` removes entries once a selection is final. A filter that
//! matched during a failed attempt therefore stays queued for the next
//! prompt.

use serde::{Deserialize, Serialize};

use crate::core::{CardLocation, PlayerId};
use crate::protocol::Located;

/// Partial card description; unset fields match anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionFilter {
    pub code: Option<u32>,
    pub location: Option<u32>,
    pub controller: Option<PlayerId>,
    pub sequence: Option<u32>,
}

impl SelectionFilter {
    /// Match any card.
    pub fn any() -> Self {
        Self::default()
    }

    /// Match cards with this passcode.
    pub fn code(code: u32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }

    /// Match exactly the card at `at`.
    pub fn at(at: CardLocation) -> Self {
        Self {
            code: None,
            location: Some(at.location),
            controller: Some(at.controller),
            sequence: Some(at.sequence),
        }
    }

    /// Also require a zone (builder pattern).
    pub fn with_location(mut self, location: u32) -> Self {
        self.location = Some(location);
        self
    }

    /// Also require a controller (builder pattern).
    pub fn with_controller(mut self, controller: PlayerId) -> Self {
        self.controller = Some(controller);
        self
    }

    /// Also require a sequence (builder pattern).
    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Check a card against every set field.
    pub fn matches<T: Located>(&self, item: &T) -> bool {
        let at = item.card_location();
        self.code.is_none_or(|c| c == item.code())
            && self.location.is_none_or(|l| l == at.location)
            && self.controller.is_none_or(|p| p == at.controller)
            && self.sequence.is_none_or(|s| s == at.sequence)
    }
}

impl From<u32> for SelectionFilter {
    fn from(code: u32) -> Self {
        Self::code(code)
    }
}

impl From<CardLocation> for SelectionFilter {
    fn from(at: CardLocation) -> Self {
        Self::at(at)
    }
}

/// A filter that found a card during a tentative pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterMatch {
    /// Position of the filter in the queue.
    pub filter: usize,
    /// Index of the matched card in the candidate list.
    pub item: usize,
}

/// Ordered selection intents. Earlier entries win.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQueue {
    filters: Vec<SelectionFilter>,
}

impl FilterQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an intent at the lowest priority.
    pub fn push(&mut self, filter: impl Into<SelectionFilter>) {
        self.filters.push(filter.into());
    }

    /// Number of unconsumed intents.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether every intent has been consumed.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// The remaining intents in priority order.
    pub fn as_slice(&self) -> &[SelectionFilter] {
        &self.filters
    }

    /// Tentatively assign cards to filters.
    ///
    /// Each filter in order takes the first card it matches that no earlier
    /// filter took. Filters with no match are skipped. Stops after `limit`
    /// assignments. The queue itself is not modified.
    pub fn tentative_matches<T: Located>(&self, items: &[T], limit: usize) -> Vec<FilterMatch> {
        let mut taken = vec![false; items.len()];
        let mut matches = Vec::new();

        for (fi, filter) in self.filters.iter().enumerate() {
            if matches.len() >= limit {
                break;
            }
            let found = items
                .iter()
                .enumerate()
                .position(|(i, item)| !taken[i] && filter.matches(item));
            if let Some(item) = found {
                taken[item] = true;
                matches.push(FilterMatch { filter: fi, item });
            }
        }

        matches
    }

    /// Remove the filters at the given queue positions, keeping the
    /// relative order of the rest.
    pub fn consume(&mut self, positions: &[usize]) {
        let mut index = 0;
        self.filters.retain(|_| {
            let keep = !positions.contains(&index);
            index += 1;
            keep
        });
    }
}

impl<F: Into<SelectionFilter>> FromIterator<F> for FilterQueue {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::constants::{LOCATION_GRAVE, LOCATION_HAND};
    use crate::protocol::Candidate;

    fn card(code: u32, location: u32, seq: u32) -> Candidate {
        Candidate::new(code, CardLocation::new(PlayerId::FIRST, location, seq))
    }

    #[test]
    fn test_unset_fields_are_wildcards() {
        let c = card(100, LOCATION_HAND, 2);
        assert!(SelectionFilter::any().matches(&c));
        assert!(SelectionFilter::code(100).matches(&c));
        assert!(!SelectionFilter::code(101).matches(&c));
        assert!(SelectionFilter::code(100).with_location(LOCATION_HAND).matches(&c));
        assert!(!SelectionFilter::code(100).with_location(LOCATION_GRAVE).matches(&c));
        assert!(!SelectionFilter::any().with_controller(PlayerId::SECOND).matches(&c));
        assert!(SelectionFilter::at(c.card_location()).matches(&c));
    }

    #[test]
    fn test_tentative_matches_skip_taken_cards() {
        let items = [card(1, LOCATION_HAND, 0), card(1, LOCATION_HAND, 1)];
        let queue: FilterQueue = [1u32, 1, 1].into_iter().collect();

        let matches = queue.tentative_matches(&items, usize::MAX);
        assert_eq!(
            matches,
            vec![
                FilterMatch { filter: 0, item: 0 },
                FilterMatch { filter: 1, item: 1 },
            ]
        );
        // Reading never consumes
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_tentative_matches_respect_limit() {
        let items = [card(1, LOCATION_HAND, 0), card(2, LOCATION_HAND, 1)];
        let queue: FilterQueue = [2u32, 1].into_iter().collect();

        let matches = queue.tentative_matches(&items, 1);
        assert_eq!(matches, vec![FilterMatch { filter: 0, item: 1 }]);
    }

    #[test]
    fn test_consume_preserves_order() {
        let mut queue: FilterQueue = [1u32, 2, 3, 4].into_iter().collect();
        queue.consume(&[2, 0]);

        let codes: Vec<_> = queue.as_slice().iter().map(|f| f.code).collect();
        assert_eq!(codes, vec![Some(2), Some(4)]);
    }
}
