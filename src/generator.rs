//! Random winning-hand and table-context synthesis.
//!
//! Draws a structurally complete hand (pair + 5 melds) from a simulated
//! tile supply, then dresses it up: revealing melds, promoting triplets to
//! kongs, picking the winning tile, deriving a win type, and attaching
//! flowers. Every distribution is driven by [`GeneratorConfig`] so tests
//! can pin down branches; pass a seeded [`ChaCha8Rng`] for reproducible
//! output.

use crate::tile::{self, Flower, COPIES_PER_KIND, NUM_FLOWER_KINDS, NUM_TILE_KINDS};
use crate::types::{Hand, Meld, Relative, Source, TableContext, Wind, WinType, NUM_MELDS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Branch probabilities for hand synthesis. All values are in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Chance that each meld is revealed rather than kept concealed.
    pub prob_reveal: f64,
    /// Chance that a revealed triplet is promoted to a kong when a fourth
    /// copy remains in the supply.
    pub prob_kong: f64,
    /// Chance that each of the eight flower tiles was drawn.
    pub prob_flower: f64,
    /// Chance of a self-drawn winning tile; the remaining mass is split
    /// evenly across the three discard directions.
    pub prob_self_draw: f64,
    /// Chance that a winning tile with no remaining concealed copies was
    /// robbed from a kong promotion.
    pub prob_rob_kong: f64,
    /// Chance that a self-draw on a hand holding a kong was the
    /// replacement draw after declaring it.
    pub prob_kong_draw: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            prob_reveal: 0.7,
            prob_kong: 0.3,
            prob_flower: 0.5,
            prob_self_draw: 0.25,
            prob_rob_kong: 0.5,
            prob_kong_draw: 0.1,
        }
    }
}

/// A deterministic generator seeded from a single integer.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

// ---------------------------------------------------------------------------
// Structure generation
// ---------------------------------------------------------------------------

/// Abstract meld shape before reveal/kong decisions.
#[derive(Debug, Clone, Copy)]
enum Shape {
    Run(u8),
    Set(u8),
}

/// Draws a pair and five melds from a fresh 4-copy supply. Restarts the
/// whole draw whenever the supply paints itself into a corner, which is
/// rare enough that the loop terminates almost immediately in practice.
fn generate_structure<R: Rng + ?Sized>(rng: &mut R) -> (u8, Vec<Shape>, [u8; NUM_TILE_KINDS]) {
    loop {
        let mut pool = [COPIES_PER_KIND; NUM_TILE_KINDS];
        let pair = rng.random_range(0..NUM_TILE_KINDS as u8);
        pool[pair as usize] -= 2;

        let mut shapes = Vec::with_capacity(NUM_MELDS);
        for _ in 0..NUM_MELDS {
            let chow_first = rng.random_bool(0.5);
            let shape = if chow_first {
                draw_run(rng, &mut pool).or_else(|| draw_set(rng, &mut pool))
            } else {
                draw_set(rng, &mut pool).or_else(|| draw_run(rng, &mut pool))
            };
            match shape {
                Some(s) => shapes.push(s),
                None => break,
            }
        }
        if shapes.len() == NUM_MELDS {
            return (pair, shapes, pool);
        }
    }
}

fn draw_run<R: Rng + ?Sized>(rng: &mut R, pool: &mut [u8; NUM_TILE_KINDS]) -> Option<Shape> {
    let starts: Vec<u8> = (0..NUM_TILE_KINDS as u8)
        .filter(|&t| {
            tile::can_start_sequence(t)
                && pool[t as usize] > 0
                && pool[t as usize + 1] > 0
                && pool[t as usize + 2] > 0
        })
        .collect();
    if starts.is_empty() {
        return None;
    }
    let start = starts[rng.random_range(0..starts.len())];
    for offset in 0..3 {
        pool[start as usize + offset] -= 1;
    }
    Some(Shape::Run(start))
}

fn draw_set<R: Rng + ?Sized>(rng: &mut R, pool: &mut [u8; NUM_TILE_KINDS]) -> Option<Shape> {
    let kinds: Vec<u8> = (0..NUM_TILE_KINDS as u8)
        .filter(|&t| pool[t as usize] >= 3)
        .collect();
    if kinds.is_empty() {
        return None;
    }
    let t = kinds[rng.random_range(0..kinds.len())];
    pool[t as usize] -= 3;
    Some(Shape::Set(t))
}

// ---------------------------------------------------------------------------
// Hand synthesis
// ---------------------------------------------------------------------------

/// Synthesizes a complete winning [`Hand`]. The output always passes
/// [`Hand::validate`].
pub fn synthesize_hand<R: Rng + ?Sized>(rng: &mut R, config: &GeneratorConfig) -> Hand {
    let (pair, shapes, mut pool) = generate_structure(rng);

    let mut concealed: Vec<u8> = vec![pair, pair];
    let mut revealed: Vec<Meld> = Vec::new();

    for shape in shapes {
        if rng.random_bool(config.prob_reveal) {
            match shape {
                Shape::Run(start) => revealed.push(Meld::sequence(start)),
                Shape::Set(t) => {
                    if pool[t as usize] > 0 && rng.random_bool(config.prob_kong) {
                        pool[t as usize] -= 1;
                        let is_concealed = rng.random_bool(0.5);
                        revealed.push(Meld::kong(t, is_concealed));
                    } else {
                        revealed.push(Meld::triplet(t));
                    }
                }
            }
        } else {
            match shape {
                Shape::Run(start) => concealed.extend([start, start + 1, start + 2]),
                Shape::Set(t) => concealed.extend([t, t, t]),
            }
        }
    }

    // Winning tile is drawn uniformly from the concealed portion.
    let winning_tile = concealed.remove(rng.random_range(0..concealed.len()));
    concealed.sort_unstable();
    revealed.sort_by(|a, b| a.tiles.cmp(&b.tiles));

    let has_kong = revealed.iter().any(Meld::is_kong);
    let robbed_candidate = !concealed.contains(&winning_tile);
    let win_type = derive_win_type(rng, config, has_kong, robbed_candidate);

    let flowers: Vec<Flower> = (1..=NUM_FLOWER_KINDS)
        .filter(|_| rng.random_bool(config.prob_flower))
        .filter_map(Flower::new)
        .collect();

    Hand {
        concealed,
        revealed,
        winning_tile,
        win_type,
        flowers,
    }
}

/// Picks a win type. Robbed kongs are only possible when the winner holds
/// no further copy of the winning tile; the self-draw band is split off
/// first and the remainder divides evenly across the discard directions.
fn derive_win_type<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GeneratorConfig,
    has_kong: bool,
    robbed_candidate: bool,
) -> WinType {
    if robbed_candidate && rng.random_bool(config.prob_rob_kong) {
        return WinType::RobbedKong(uniform_source(rng));
    }
    let roll: f64 = rng.random();
    if roll < config.prob_self_draw {
        if has_kong && rng.random_bool(config.prob_kong_draw) {
            return WinType::KongDraw;
        }
        return WinType::SelfDraw;
    }
    let band = (1.0 - config.prob_self_draw) / 3.0;
    if roll < config.prob_self_draw + band {
        WinType::Discard(Source::Next)
    } else if roll < config.prob_self_draw + 2.0 * band {
        WinType::Discard(Source::Prev)
    } else {
        WinType::Discard(Source::Opp)
    }
}

fn uniform_source<R: Rng + ?Sized>(rng: &mut R) -> Source {
    match rng.random_range(0..3) {
        0 => Source::Next,
        1 => Source::Prev,
        _ => Source::Opp,
    }
}

// ---------------------------------------------------------------------------
// Context synthesis
// ---------------------------------------------------------------------------

/// Synthesizes a random [`TableContext`]. The dealer streak follows a
/// discretized exponential with rate 0.5, capped at 6.
pub fn generate_context<R: Rng + ?Sized>(rng: &mut R) -> TableContext {
    let dealer = Relative::ALL[rng.random_range(0..Relative::ALL.len())];
    let seat = Relative::ALL[rng.random_range(0..Relative::ALL.len())];
    let prevailing_wind = Wind::ALL[rng.random_range(0..Wind::ALL.len())];
    let u: f64 = rng.random();
    let dealer_streak = ((-(1.0 - u).ln()) / 0.5).floor().min(6.0) as u8;
    TableContext {
        dealer,
        dealer_streak,
        seat,
        prevailing_wind,
    }
}
