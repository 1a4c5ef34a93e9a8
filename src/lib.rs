//! Fan scoring for the Taiwanese 17-tile variant.
//!
//! The crate models tiles, melds, and winning hands; decomposes hands
//! with a recursive count-vector solver; evaluates a catalog of scoring
//! patterns (fans); and resolves pattern exclusions in two passes to
//! produce dealer and non-dealer totals. A seedable synthesizer produces
//! random-but-valid winning hands and table situations for testing and
//! simulation.
//!
//! ```
//! use taifan::{settle, synthesize_hand, generate_context, seeded_rng, GeneratorConfig};
//!
//! let mut rng = seeded_rng(7);
//! let hand = synthesize_hand(&mut rng, &GeneratorConfig::default());
//! let ctx = generate_context(&mut rng);
//! let settlement = settle(&ctx, &hand).unwrap();
//! assert_eq!(
//!     settlement.dealer.total,
//!     settlement.dealer.fans.iter().map(|f| f.value).sum::<u32>()
//! );
//! ```

pub mod engine;
pub mod errors;
pub mod fan;
pub mod generator;
pub mod parser;
pub mod solver;
pub mod tile;
pub mod types;

pub use engine::{score_dealer, score_non_dealer, settle, total_points, ScoredFans, Settlement};
pub use errors::{ScoreError, ScoreResult};
pub use fan::{FanKind, FanResult, FAN_CATALOG, NON_DEALER_SKIP};
pub use generator::{generate_context, seeded_rng, synthesize_hand, GeneratorConfig};
pub use parser::{parse_tile, parse_tiles, render_tiles};
pub use solver::{can_partition, can_partition_all_sequences, counts_from_tiles, enumerate_waits};
pub use tile::{Flower, Suit};
pub use types::{
    Hand, Meld, MeldType, Relative, Source, TableContext, Wind, WinType, HAND_TILES, NUM_MELDS,
};
