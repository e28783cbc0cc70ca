//! Zone and position choices for summons.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::protocol::{Message, MessageKind, Place};

use super::{Advancor, MapAdvancor, PolicyResult};

/// Preferred zone slot and battle position; unset fields match anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceFilter {
    pub player: Option<PlayerId>,
    pub location: Option<u32>,
    pub sequence: Option<u32>,
    pub position: Option<u32>,
}

impl PlaceFilter {
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    pub fn with_location(mut self, location: u32) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    pub fn matches(&self, place: &Place) -> bool {
        self.player.is_none_or(|p| p == place.player)
            && self.location.is_none_or(|l| l == place.location)
            && self.sequence.is_none_or(|s| s == place.sequence)
    }
}

/// Answers place prompts with the first open slots matching a
/// [`PlaceFilter`], and position prompts with its position (or the lowest
/// offered one).
#[derive(Debug)]
pub struct SummonPlaceAdvancor {
    inner: MapAdvancor<'static>,
}

impl SummonPlaceAdvancor {
    pub fn new(filter: PlaceFilter) -> Self {
        let inner = MapAdvancor::new()
            .with_handler(MessageKind::SelectPlace, move |msg| {
                let Message::SelectPlace(m) = msg else {
                    return None;
                };
                let places: Vec<Place> = m
                    .selectable_places()
                    .into_iter()
                    .filter(|p| filter.matches(p))
                    .take(usize::from(m.count))
                    .collect();
                m.prepare_response(&places).ok()
            })
            .with_handler(MessageKind::SelectPosition, move |msg| {
                let Message::SelectPosition(m) = msg else {
                    return None;
                };
                let position = filter.position.or_else(|| m.lowest_position())?;
                m.prepare_response(position).ok()
            });
        Self { inner }
    }
}

impl Default for SummonPlaceAdvancor {
    fn default() -> Self {
        Self::new(PlaceFilter::default())
    }
}

impl Advancor for SummonPlaceAdvancor {
    fn advance(&mut self, msg: &Message) -> PolicyResult {
        self.inner.advance(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::constants::{
        LOCATION_MZONE, POS_FACEDOWN_DEFENSE, POS_FACEUP_ATTACK, POS_FACEUP_DEFENSE,
    };
    use crate::protocol::{Response, SelectPlaceMsg, SelectPositionMsg};

    fn place_msg(field_mask: u32) -> Message {
        Message::SelectPlace(SelectPlaceMsg {
            player: PlayerId::FIRST,
            count: 1,
            field_mask,
        })
    }

    #[test]
    fn test_picks_matching_slot() {
        let mut policy = SummonPlaceAdvancor::new(
            PlaceFilter::default()
                .with_location(LOCATION_MZONE)
                .with_sequence(2),
        );
        let response = policy.advance(&place_msg(0)).into_response().unwrap();
        assert_eq!(response.as_bytes(), &[0, LOCATION_MZONE as u8, 2]);
    }

    #[test]
    fn test_blocked_slot_defers() {
        let mut policy = SummonPlaceAdvancor::new(PlaceFilter::default().with_sequence(2));
        // Own monster zone 2 and spell zone 2 both blocked
        let mask = (1 << 2) | (1 << 10) | (0xffff << 16);
        assert!(policy.advance(&place_msg(mask)).is_deferred());
    }

    #[test]
    fn test_position() {
        let msg = Message::SelectPosition(SelectPositionMsg {
            player: PlayerId::FIRST,
            code: 1,
            positions: POS_FACEUP_ATTACK | POS_FACEUP_DEFENSE,
        });

        let mut lowest = SummonPlaceAdvancor::default();
        assert_eq!(
            lowest.advance(&msg).into_response(),
            Some(Response::from_i32(POS_FACEUP_ATTACK as i32))
        );

        let mut defense =
            SummonPlaceAdvancor::new(PlaceFilter::default().with_position(POS_FACEUP_DEFENSE));
        assert_eq!(
            defense.advance(&msg).into_response(),
            Some(Response::from_i32(POS_FACEUP_DEFENSE as i32))
        );

        let mut unavailable =
            SummonPlaceAdvancor::new(PlaceFilter::default().with_position(POS_FACEDOWN_DEFENSE));
        assert!(unavailable.advance(&msg).is_deferred());
    }
}
