//! Tile model for the Taiwanese 17-tile variant.
//!
//! Provides the 34-tile index space (0-33), suit/honor classification,
//! display names, and the flower tiles (seasons 1-4, plants 5-8) which sit
//! outside the index space and never participate in meld decomposition.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Total number of distinct playable tile kinds (0-33).
pub const NUM_TILE_KINDS: usize = 34;

/// Physical copies of each tile kind in the set.
pub const COPIES_PER_KIND: u8 = 4;

/// Number of ranks per suited category (1-9).
pub const NUM_SUIT_RANKS: u8 = 9;

// Suit range starts (tile kind indices).
pub const CHARACTER_START: u8 = 0;
pub const DOT_START: u8 = 9;
pub const BAMBOO_START: u8 = 18;
pub const HONOR_START: u8 = 27;

// Named honor tile indices.
pub const EAST: u8 = 27;
pub const SOUTH: u8 = 28;
pub const WEST: u8 = 29;
pub const NORTH: u8 = 30;
pub const WHITE_DRAGON: u8 = 31;
pub const GREEN_DRAGON: u8 = 32;
pub const RED_DRAGON: u8 = 33;

/// Number of distinct flower tiles (one copy of each in the set).
pub const NUM_FLOWER_KINDS: u8 = 8;

// ---------------------------------------------------------------------------
// Suit
// ---------------------------------------------------------------------------

/// The four tile categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Characters = 0,
    Dots = 1,
    Bamboo = 2,
    Honor = 3,
}

impl Suit {
    /// Starting tile kind index for this suit.
    #[inline]
    pub const fn start(self) -> u8 {
        match self {
            Suit::Characters => CHARACTER_START,
            Suit::Dots => DOT_START,
            Suit::Bamboo => BAMBOO_START,
            Suit::Honor => HONOR_START,
        }
    }

    /// Localized suit label for the three numbered suits.
    pub const fn label(self) -> &'static str {
        match self {
            Suit::Characters => "萬子",
            Suit::Dots => "筒子",
            Suit::Bamboo => "索子",
            Suit::Honor => "字牌",
        }
    }
}

// ---------------------------------------------------------------------------
// Classification helpers
// ---------------------------------------------------------------------------

/// Which suit a tile kind (0-33) belongs to.
#[inline]
pub const fn suit_of(tile: u8) -> Suit {
    match tile {
        0..=8 => Suit::Characters,
        9..=17 => Suit::Dots,
        18..=26 => Suit::Bamboo,
        _ => Suit::Honor,
    }
}

/// 0-based rank within the suit (0-8), or `None` for honor tiles.
#[inline]
pub const fn rank_of(tile: u8) -> Option<u8> {
    if tile < HONOR_START {
        Some(tile % NUM_SUIT_RANKS)
    } else {
        None
    }
}

/// True for wind or dragon tiles (27-33).
#[inline]
pub const fn is_honor(tile: u8) -> bool {
    tile >= HONOR_START
}

/// True for the four wind honors (27-30).
#[inline]
pub const fn is_wind(tile: u8) -> bool {
    tile >= EAST && tile <= NORTH
}

/// True for the three dragon honors (31-33).
#[inline]
pub const fn is_dragon(tile: u8) -> bool {
    tile >= WHITE_DRAGON && tile <= RED_DRAGON
}

/// True for characters, dots, or bamboo (not honors).
#[inline]
pub const fn is_suited(tile: u8) -> bool {
    tile < HONOR_START
}

/// True if a sequence `[tile, tile+1, tile+2]` stays within one suited
/// block. Honors can never start a sequence.
#[inline]
pub const fn can_start_sequence(tile: u8) -> bool {
    if tile >= HONOR_START {
        return false;
    }
    tile % NUM_SUIT_RANKS <= 6
}

// ---------------------------------------------------------------------------
// Display names
// ---------------------------------------------------------------------------

const TILE_NAMES: [&str; NUM_TILE_KINDS] = [
    "1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m", "1p", "2p", "3p", "4p", "5p", "6p", "7p",
    "8p", "9p", "1s", "2s", "3s", "4s", "5s", "6s", "7s", "8s", "9s", "1z", "2z", "3z", "4z", "5z",
    "6z", "7z",
];

/// Short notation for a tile kind ("1m".."9s", "1z".."7z").
/// Out-of-range values return "??".
#[inline]
pub fn tile_name(tile: u8) -> &'static str {
    TILE_NAMES.get(tile as usize).copied().unwrap_or("??")
}

/// Localized single-character label for a wind tile (27-30).
pub const fn wind_label(tile: u8) -> &'static str {
    match tile {
        EAST => "東",
        SOUTH => "南",
        WEST => "西",
        NORTH => "北",
        _ => "?",
    }
}

// ---------------------------------------------------------------------------
// Flowers
// ---------------------------------------------------------------------------

/// A flower tile, numbered 1-8. 1-4 form the season set, 5-8 the plant set.
///
/// A season flower matches seat number `n` when its id equals `n`; a plant
/// flower matches when its id equals `n + 4`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flower(u8);

impl Flower {
    /// Creates a `Flower` if `id` is in range 1..=8.
    #[inline]
    pub const fn new(id: u8) -> Option<Self> {
        if id >= 1 && id <= NUM_FLOWER_KINDS {
            Some(Flower(id))
        } else {
            None
        }
    }

    /// Raw flower number (1-8).
    #[inline]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// True for the season set (1-4).
    #[inline]
    pub const fn is_season(self) -> bool {
        self.0 <= 4
    }

    /// True for the plant set (5-8).
    #[inline]
    pub const fn is_plant(self) -> bool {
        self.0 >= 5
    }

    /// Whether this flower belongs to the given seat number (1-4).
    #[inline]
    pub const fn matches_seat(self, seat_number: u8) -> bool {
        self.0 == seat_number || self.0 == seat_number + 4
    }
}

impl fmt::Debug for Flower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flower({}f)", self.0)
    }
}

impl fmt::Display for Flower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}f", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
