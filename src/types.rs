//! Hand, meld, win-type, and table-context model.
//!
//! A winning hand is 1 pair + 5 melds (17 tiles). Kongs count as their
//! underlying triplet for structural purposes but carry 4 physical tiles,
//! so a hand with kongs holds more than 17 physical tiles.

use crate::errors::{ScoreError, ScoreResult};
use crate::tile::{self, Flower, COPIES_PER_KIND, NUM_TILE_KINDS};
use serde::{Deserialize, Serialize};

/// Structural meld count of a complete hand.
pub const NUM_MELDS: usize = 5;

/// Structural tile count of a complete hand (pair + 5 melds).
pub const HAND_TILES: usize = 2 + 3 * NUM_MELDS;

// ---------------------------------------------------------------------------
// Winds and seat relations
// ---------------------------------------------------------------------------

/// Wind directions, used for the prevailing wind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Wind {
    #[default]
    East = 0,
    South = 1,
    West = 2,
    North = 3,
}

impl Wind {
    pub const ALL: [Wind; 4] = [Wind::East, Wind::South, Wind::West, Wind::North];

    /// The honor tile index (27-30) for this wind.
    #[inline]
    pub const fn tile(self) -> u8 {
        tile::EAST + self as u8
    }
}

impl From<u8> for Wind {
    fn from(val: u8) -> Self {
        Wind::ALL[(val % 4) as usize]
    }
}

/// A seat described relative to the scoring player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relative {
    Me,
    Next,
    Prev,
    Opp,
}

impl Relative {
    pub const ALL: [Relative; 4] = [Relative::Me, Relative::Next, Relative::Prev, Relative::Opp];
}

/// The seat a discard or robbed kong came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    Next,
    Prev,
    Opp,
}

// ---------------------------------------------------------------------------
// Win type
// ---------------------------------------------------------------------------

/// How the winning tile was obtained. Exactly one tag per hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinType {
    /// Drawn from the wall.
    SelfDraw,
    /// Drawn from the wall immediately after declaring a kong.
    KongDraw,
    /// Claimed from another seat's discard.
    Discard(Source),
    /// Robbed from another seat's kong promotion.
    RobbedKong(Source),
}

impl WinType {
    /// True for both plain self-draw and kong-draw.
    #[inline]
    pub const fn is_self_drawn(self) -> bool {
        matches!(self, WinType::SelfDraw | WinType::KongDraw)
    }
}

// ---------------------------------------------------------------------------
// Melds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldType {
    Sequence,
    Triplet,
    /// 4-of-a-kind formed entirely from concealed tiles.
    ConcealedKong,
    /// 4-of-a-kind formed with a claimed discard or promoted from a
    /// revealed triplet.
    RevealedKong,
}

/// A revealed meld. Sequences and triplets carry 3 tiles, kongs carry 4.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub meld_type: MeldType,
    pub tiles: Vec<u8>,
}

impl Meld {
    pub fn sequence(start: u8) -> Self {
        Meld {
            meld_type: MeldType::Sequence,
            tiles: vec![start, start + 1, start + 2],
        }
    }

    pub fn triplet(t: u8) -> Self {
        Meld {
            meld_type: MeldType::Triplet,
            tiles: vec![t; 3],
        }
    }

    pub fn kong(t: u8, concealed: bool) -> Self {
        Meld {
            meld_type: if concealed {
                MeldType::ConcealedKong
            } else {
                MeldType::RevealedKong
            },
            tiles: vec![t; 4],
        }
    }

    #[inline]
    pub fn is_kong(&self) -> bool {
        matches!(
            self.meld_type,
            MeldType::ConcealedKong | MeldType::RevealedKong
        )
    }

    #[inline]
    pub fn is_concealed_kong(&self) -> bool {
        self.meld_type == MeldType::ConcealedKong
    }

    /// True for triplets and kongs (any all-identical meld).
    #[inline]
    pub fn is_set(&self) -> bool {
        self.meld_type != MeldType::Sequence
    }

    /// The lowest tile of the meld (identical tile for sets).
    #[inline]
    pub fn base_tile(&self) -> u8 {
        self.tiles[0]
    }
}

// ---------------------------------------------------------------------------
// Table context
// ---------------------------------------------------------------------------

/// The table situation for one scoring call. Immutable per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableContext {
    /// Where the current dealer sits relative to the scoring player.
    pub dealer: Relative,
    /// Dealer win-streak; 0 means no streak bonus.
    pub dealer_streak: u8,
    /// The scoring player's seat placement, which fixes their seat wind
    /// and flower numbers.
    pub seat: Relative,
    pub prevailing_wind: Wind,
}

impl TableContext {
    /// Seat number 1-4 (east through north) derived from the placement.
    #[inline]
    pub const fn seat_number(&self) -> u8 {
        match self.seat {
            Relative::Me => 1,
            Relative::Prev => 2,
            Relative::Opp => 3,
            Relative::Next => 4,
        }
    }

    /// The honor tile (27-30) matching the player's seat wind.
    #[inline]
    pub const fn seat_wind_tile(&self) -> u8 {
        tile::EAST - 1 + self.seat_number()
    }
}

// ---------------------------------------------------------------------------
// Hand
// ---------------------------------------------------------------------------

/// A complete winning hand. Built once, consumed read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    /// Concealed tiles, excluding the winning tile. Sorted ascending.
    pub concealed: Vec<u8>,
    /// Revealed melds (including concealed kongs, which are declared but
    /// not claimable).
    pub revealed: Vec<Meld>,
    pub winning_tile: u8,
    pub win_type: WinType,
    pub flowers: Vec<Flower>,
}

impl Hand {
    /// Physical tile histogram over the full hand: concealed tiles, every
    /// revealed meld tile (4 for kongs), and the winning tile.
    pub fn tile_counts(&self) -> [u8; NUM_TILE_KINDS] {
        let mut counts = [0u8; NUM_TILE_KINDS];
        for meld in &self.revealed {
            for &t in &meld.tiles {
                counts[t as usize] += 1;
            }
        }
        for &t in &self.concealed {
            counts[t as usize] += 1;
        }
        counts[self.winning_tile as usize] += 1;
        counts
    }

    /// Histogram over the concealed tiles only (no melds, no winning tile).
    pub fn concealed_counts(&self) -> [u8; NUM_TILE_KINDS] {
        let mut counts = [0u8; NUM_TILE_KINDS];
        for &t in &self.concealed {
            counts[t as usize] += 1;
        }
        counts
    }

    /// Copies of `t` among the concealed tiles.
    pub fn concealed_count(&self, t: u8) -> usize {
        self.concealed.iter().filter(|&&x| x == t).count()
    }

    /// True when every revealed meld is a concealed kong.
    pub fn is_fully_concealed(&self) -> bool {
        self.revealed.iter().all(Meld::is_concealed_kong)
    }

    /// True when any revealed meld is a kong.
    pub fn has_kong(&self) -> bool {
        self.revealed.iter().any(Meld::is_kong)
    }

    /// Checks the structural invariant: tile indices in range, 1 pair +
    /// 5 melds worth of tiles, physical counts within 4 copies, melds
    /// well-formed, flowers distinct. Malformed external input fails here
    /// so the engine can assume well-formed hands.
    pub fn validate(&self) -> ScoreResult<()> {
        let structural = self.concealed.len() + 1 + 3 * self.revealed.len();
        if structural != HAND_TILES {
            return Err(ScoreError::InvalidHand {
                message: format!(
                    "expected {} structural tiles, found {}",
                    HAND_TILES, structural
                ),
            });
        }

        for meld in &self.revealed {
            let ok = match meld.meld_type {
                MeldType::Sequence => {
                    meld.tiles.len() == 3
                        && tile::can_start_sequence(meld.tiles[0])
                        && meld.tiles[1] == meld.tiles[0] + 1
                        && meld.tiles[2] == meld.tiles[0] + 2
                }
                MeldType::Triplet => {
                    meld.tiles.len() == 3 && meld.tiles.iter().all(|&t| t == meld.tiles[0])
                }
                MeldType::ConcealedKong | MeldType::RevealedKong => {
                    meld.tiles.len() == 4 && meld.tiles.iter().all(|&t| t == meld.tiles[0])
                }
            };
            if !ok {
                return Err(ScoreError::InvalidHand {
                    message: format!("malformed {:?} meld {:?}", meld.meld_type, meld.tiles),
                });
            }
        }

        let all_tiles = self
            .concealed
            .iter()
            .chain(self.revealed.iter().flat_map(|m| m.tiles.iter()))
            .chain(std::iter::once(&self.winning_tile));
        let mut counts = [0u8; NUM_TILE_KINDS];
        for &t in all_tiles {
            if t as usize >= NUM_TILE_KINDS {
                return Err(ScoreError::InvalidHand {
                    message: format!("tile index {} out of range", t),
                });
            }
            counts[t as usize] += 1;
            if counts[t as usize] > COPIES_PER_KIND {
                return Err(ScoreError::InvalidHand {
                    message: format!("more than 4 copies of {}", tile::tile_name(t)),
                });
            }
        }

        for (i, f) in self.flowers.iter().enumerate() {
            if self.flowers[..i].contains(f) {
                return Err(ScoreError::InvalidHand {
                    message: format!("duplicate flower {}", f),
                });
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn flower(id: u8) -> Flower {
        Flower::new(id).unwrap()
    }

    /// 123m 456m 789m 111p + 22p pair, all concealed, winning on 2p.
    fn simple_hand() -> Hand {
        Hand {
            concealed: vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 9, 9, 0, 1, 2, 10],
            revealed: vec![],
            winning_tile: 10,
            win_type: WinType::Discard(Source::Next),
            flowers: vec![],
        }
    }

    #[test]
    fn seat_numbers() {
        let mut ctx = TableContext {
            dealer: Relative::Me,
            dealer_streak: 0,
            seat: Relative::Me,
            prevailing_wind: Wind::East,
        };
        assert_eq!(ctx.seat_number(), 1);
        assert_eq!(ctx.seat_wind_tile(), tile::EAST);
        ctx.seat = Relative::Prev;
        assert_eq!(ctx.seat_number(), 2);
        assert_eq!(ctx.seat_wind_tile(), tile::SOUTH);
        ctx.seat = Relative::Opp;
        assert_eq!(ctx.seat_number(), 3);
        ctx.seat = Relative::Next;
        assert_eq!(ctx.seat_number(), 4);
        assert_eq!(ctx.seat_wind_tile(), tile::NORTH);
    }

    #[test]
    fn wind_tiles() {
        assert_eq!(Wind::East.tile(), 27);
        assert_eq!(Wind::North.tile(), 30);
        assert_eq!(Wind::from(6), Wind::West);
    }

    #[test]
    fn kong_counts_as_triplet_structurally() {
        // One concealed kong replaces a meld: 13 concealed + win + 1 meld.
        let hand = Hand {
            concealed: vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 18, 19, 20, 9],
            revealed: vec![Meld::kong(33, true)],
            winning_tile: 9,
            win_type: WinType::SelfDraw,
            flowers: vec![],
        };
        hand.validate().expect("kong hand should validate");
        // 4 physical copies of the kong tile in the histogram.
        assert_eq!(hand.tile_counts()[33], 4);
    }

    #[test]
    fn validate_accepts_simple_hand() {
        simple_hand().validate().expect("should validate");
    }

    #[test]
    fn validate_rejects_wrong_size() {
        let mut hand = simple_hand();
        hand.concealed.pop();
        assert!(hand.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let mut hand = simple_hand();
        hand.concealed[0] = 34;
        assert!(hand.validate().is_err());
    }

    #[test]
    fn validate_rejects_fifth_copy() {
        let mut hand = simple_hand();
        // 9p appears 3 times; push two more via winning tile + concealed
        hand.concealed[15] = 9;
        hand.concealed[12] = 9;
        assert!(hand.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_meld() {
        let hand = Hand {
            concealed: vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 9, 9, 10],
            revealed: vec![Meld {
                meld_type: MeldType::Sequence,
                tiles: vec![7, 8, 9], // crosses the m/p suit boundary
            }],
            winning_tile: 10,
            win_type: WinType::SelfDraw,
            flowers: vec![],
        };
        assert!(hand.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_flower() {
        let mut hand = simple_hand();
        hand.flowers = vec![flower(2), flower(2)];
        assert!(hand.validate().is_err());
    }

    #[test]
    fn fully_concealed_classification() {
        let mut hand = simple_hand();
        assert!(hand.is_fully_concealed());
        hand.concealed.truncate(13);
        hand.revealed.push(Meld::triplet(20));
        assert!(!hand.is_fully_concealed());
        // A concealed kong keeps the hand concealed
        let kong_hand = Hand {
            concealed: vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 18, 19, 20, 9],
            revealed: vec![Meld::kong(33, true)],
            winning_tile: 9,
            win_type: WinType::SelfDraw,
            flowers: vec![],
        };
        assert!(kong_hand.is_fully_concealed());
        assert!(kong_hand.has_kong());
    }

    #[test]
    fn win_type_self_drawn() {
        assert!(WinType::SelfDraw.is_self_drawn());
        assert!(WinType::KongDraw.is_self_drawn());
        assert!(!WinType::Discard(Source::Opp).is_self_drawn());
        assert!(!WinType::RobbedKong(Source::Prev).is_self_drawn());
    }
}
