//! Hand-decomposition solver.
//!
//! Decides whether a tile multiset splits into exactly `meld_count` melds
//! (triplet or sequence) plus one pair, and enumerates the wait set of a
//! concealed hand. Works on a fixed 34-entry count vector and always
//! extracts a group starting at the lowest remaining tile, which keeps the
//! search exhaustive without tracking tile positions.

use crate::tile::{self, COPIES_PER_KIND, NUM_TILE_KINDS};

/// Tile histogram used by the solver.
pub type TileCounts = [u8; NUM_TILE_KINDS];

/// Builds a count vector from a tile list. Indices >= 34 are ignored.
pub fn counts_from_tiles(tiles: &[u8]) -> TileCounts {
    let mut counts = [0u8; NUM_TILE_KINDS];
    for &t in tiles {
        if (t as usize) < NUM_TILE_KINDS {
            counts[t as usize] += 1;
        }
    }
    counts
}

/// True iff the multiset splits into exactly `meld_count` melds plus one
/// pair with nothing left over. Multisets with more than 4 copies of any
/// kind, or whose size is not `2 + 3 * meld_count`, are rejected outright.
pub fn can_partition(counts: &TileCounts, meld_count: usize) -> bool {
    partition_impl(counts, meld_count, true)
}

/// Like [`can_partition`] but forbids triplets: every meld must be a
/// sequence. Used for the all-sequence structural test behind the flat-win
/// pattern.
pub fn can_partition_all_sequences(counts: &TileCounts, meld_count: usize) -> bool {
    partition_impl(counts, meld_count, false)
}

fn partition_impl(counts: &TileCounts, meld_count: usize, allow_triplets: bool) -> bool {
    if counts.iter().any(|&c| c > COPIES_PER_KIND) {
        return false;
    }
    let total: usize = counts.iter().map(|&c| c as usize).sum();
    if total != 2 + 3 * meld_count {
        return false;
    }

    let mut work = *counts;
    for pair in 0..NUM_TILE_KINDS {
        if work[pair] < 2 {
            continue;
        }
        work[pair] -= 2;
        let ok = extract_melds(&mut work, meld_count, allow_triplets);
        work[pair] += 2;
        if ok {
            return true;
        }
    }
    false
}

/// Consumes the remaining counts as exactly `melds_left` melds. The lowest
/// nonzero tile must begin some group, so only a triplet of it or a
/// sequence starting at it need be tried.
fn extract_melds(counts: &mut TileCounts, melds_left: usize, allow_triplets: bool) -> bool {
    let lowest = match counts.iter().position(|&c| c > 0) {
        Some(t) => t,
        None => return melds_left == 0,
    };
    if melds_left == 0 {
        return false;
    }

    if allow_triplets && counts[lowest] >= 3 {
        counts[lowest] -= 3;
        let ok = extract_melds(counts, melds_left - 1, allow_triplets);
        counts[lowest] += 3;
        if ok {
            return true;
        }
    }

    if tile::can_start_sequence(lowest as u8) && counts[lowest + 1] > 0 && counts[lowest + 2] > 0 {
        counts[lowest] -= 1;
        counts[lowest + 1] -= 1;
        counts[lowest + 2] -= 1;
        let ok = extract_melds(counts, melds_left - 1, allow_triplets);
        counts[lowest] += 1;
        counts[lowest + 1] += 1;
        counts[lowest + 2] += 1;
        if ok {
            return true;
        }
    }

    false
}

/// Enumerates every tile kind that completes the given concealed tiles
/// into a partitionable whole, trying meld counts 0 through 4.
///
/// Operates on the concealed tiles only: revealed melds are fixed and do
/// not participate, so callers must pass the correct tile subset. A fully
/// concealed 16-tile hand would need 5 melds and therefore reports an
/// empty wait set here.
pub fn enumerate_waits(concealed: &TileCounts) -> Vec<u8> {
    let mut waits = Vec::new();
    for t in 0..NUM_TILE_KINDS {
        let mut trial = *concealed;
        trial[t] += 1;
        for meld_count in 0..=4 {
            if can_partition(&trial, meld_count) {
                waits.push(t as u8);
                break;
            }
        }
    }
    waits
}
