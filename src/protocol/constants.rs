//! Wire constants shared with the duel engine.

// Message identifiers
pub const MSG_RETRY: u8 = 1;
pub const MSG_HINT: u8 = 2;
pub const MSG_WIN: u8 = 5;
pub const MSG_SELECT_BATTLECMD: u8 = 10;
pub const MSG_SELECT_IDLECMD: u8 = 11;
pub const MSG_SELECT_EFFECTYN: u8 = 12;
pub const MSG_SELECT_YESNO: u8 = 13;
pub const MSG_SELECT_OPTION: u8 = 14;
pub const MSG_SELECT_CARD: u8 = 15;
pub const MSG_SELECT_CHAIN: u8 = 16;
pub const MSG_SELECT_PLACE: u8 = 18;
pub const MSG_SELECT_POSITION: u8 = 19;
pub const MSG_SELECT_TRIBUTE: u8 = 20;
pub const MSG_SORT_CHAIN: u8 = 21;
pub const MSG_SELECT_COUNTER: u8 = 22;
pub const MSG_SELECT_SUM: u8 = 23;
pub const MSG_SELECT_DISFIELD: u8 = 24;
pub const MSG_SORT_CARD: u8 = 25;
pub const MSG_SELECT_UNSELECT_CARD: u8 = 26;
pub const MSG_NEW_TURN: u8 = 40;
pub const MSG_NEW_PHASE: u8 = 41;
pub const MSG_DRAW: u8 = 90;
pub const MSG_ROCK_PAPER_SCISSORS: u8 = 132;
pub const MSG_ANNOUNCE_RACE: u8 = 140;
pub const MSG_ANNOUNCE_ATTRIB: u8 = 141;
pub const MSG_ANNOUNCE_CARD: u8 = 142;
pub const MSG_ANNOUNCE_NUMBER: u8 = 143;

// Locations
pub const LOCATION_DECK: u32 = 0x01;
pub const LOCATION_HAND: u32 = 0x02;
pub const LOCATION_MZONE: u32 = 0x04;
pub const LOCATION_SZONE: u32 = 0x08;
pub const LOCATION_GRAVE: u32 = 0x10;
pub const LOCATION_REMOVED: u32 = 0x20;
pub const LOCATION_EXTRA: u32 = 0x40;

/// Every zone bit from deck to extra deck.
pub const LOCATION_ALL: u32 = 0x7f;

// Positions
pub const POS_FACEUP_ATTACK: u32 = 0x1;
pub const POS_FACEDOWN_ATTACK: u32 = 0x2;
pub const POS_FACEUP_DEFENSE: u32 = 0x4;
pub const POS_FACEDOWN_DEFENSE: u32 = 0x8;

/// Zones whose cards enter face-up attack unless told otherwise.
pub const FACEUP_LOCATIONS: u32 = LOCATION_MZONE | LOCATION_GRAVE | LOCATION_REMOVED;

/// Monster zone slots per player, including the two extra monster zones.
pub const MZONE_SLOTS: u32 = 7;

/// Spell/trap zone slots per player, including field and pendulum slots.
pub const SZONE_SLOTS: u32 = 8;

/// Sentinel answer for "decline" / "finish" / "keep order".
pub const RESPONSE_DECLINE: i32 = -1;
