//! Property tests driving the synthesizer through the scoring pipeline.

use proptest::prelude::*;
use rand::Rng;
use taifan::{
    can_partition, counts_from_tiles, enumerate_waits, generate_context, score_dealer,
    score_non_dealer, seeded_rng, settle, synthesize_hand, GeneratorConfig,
};

proptest! {
    #[test]
    fn synthesized_hands_always_validate(seed in 0u64..5_000) {
        let mut rng = seeded_rng(seed);
        let hand = synthesize_hand(&mut rng, &GeneratorConfig::default());
        prop_assert!(hand.validate().is_ok(), "seed {}: {:?}", seed, hand);
    }

    #[test]
    fn synthesized_hands_decompose_structurally(seed in 0u64..2_000) {
        let mut rng = seeded_rng(seed);
        let hand = synthesize_hand(&mut rng, &GeneratorConfig::default());
        // Kongs collapse to their structural triplet before decomposition.
        let mut counts = hand.tile_counts();
        for meld in hand.revealed.iter().filter(|m| m.is_kong()) {
            counts[meld.base_tile() as usize] -= 1;
        }
        prop_assert!(can_partition(&counts, 5), "seed {}: {:?}", seed, hand);
    }

    #[test]
    fn scoring_never_fails_on_synthesized_input(seed in 0u64..2_000) {
        let mut rng = seeded_rng(seed);
        let hand = synthesize_hand(&mut rng, &GeneratorConfig::default());
        let ctx = generate_context(&mut rng);
        let settlement = settle(&ctx, &hand);
        prop_assert!(settlement.is_ok(), "seed {}: {:?}", seed, settlement);
    }

    #[test]
    fn every_wait_completes_a_partition(seed in 0u64..2_000) {
        // Random concealed tile sets: each reported wait, added to the
        // set, must partition at some meld count.
        let mut rng = seeded_rng(seed);
        let len = rng.random_range(1..=13usize);
        let tiles: Vec<u8> = (0..len).map(|_| rng.random_range(0..34u8)).collect();
        let counts = counts_from_tiles(&tiles);
        for wait in enumerate_waits(&counts) {
            let mut trial = counts;
            trial[wait as usize] += 1;
            prop_assert!(
                (0..=4).any(|k| can_partition(&trial, k)),
                "wait {} does not complete {:?}",
                wait,
                tiles
            );
        }
    }

    #[test]
    fn dealer_variant_dominates(seed in 0u64..2_000) {
        // The non-dealer catalog is a strict subset, so its total can
        // never exceed the dealer total for the same hand.
        let mut rng = seeded_rng(seed);
        let hand = synthesize_hand(&mut rng, &GeneratorConfig::default());
        let ctx = generate_context(&mut rng);
        let dealer = score_dealer(&ctx, &hand);
        let non_dealer = score_non_dealer(&ctx, &hand);
        prop_assert!(dealer.total >= non_dealer.total);
    }

    #[test]
    fn same_seed_reproduces_everything(seed in 0u64..1_000) {
        let run = |seed| {
            let mut rng = seeded_rng(seed);
            let hand = synthesize_hand(&mut rng, &GeneratorConfig::default());
            let ctx = generate_context(&mut rng);
            (hand, ctx)
        };
        prop_assert_eq!(run(seed), run(seed));
    }

    #[test]
    fn resolved_fans_are_unique_and_positive(seed in 0u64..2_000) {
        let mut rng = seeded_rng(seed);
        let hand = synthesize_hand(&mut rng, &GeneratorConfig::default());
        let ctx = generate_context(&mut rng);
        let scored = score_dealer(&ctx, &hand);
        for (i, fan) in scored.fans.iter().enumerate() {
            prop_assert!(fan.achieved);
            prop_assert!(fan.value > 0, "{:?} scored zero", fan.kind);
            prop_assert!(
                !scored.fans[..i].iter().any(|f| f.kind == fan.kind),
                "duplicate {:?}",
                fan.kind
            );
        }
    }
}
