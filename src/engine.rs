//! Two-pass fan resolution.
//!
//! Pass one evaluates every rule in the catalog and collects the set of
//! patterns nullified by achieved umbrella patterns. Pass two keeps the
//! achieved results whose kind survived. Exclusion is one level deep: an
//! excluded fan still contributes its own exclusions collected in pass
//! one, exactly as the rule catalog defines them.

use crate::fan::{FanCheck, FanKind, FanResult, FAN_CATALOG, NON_DEALER_SKIP};
use crate::types::{Hand, Relative, TableContext};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Resolved fan list for one scoring perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredFans {
    /// Achieved, non-excluded fans in catalog order.
    pub fans: Vec<FanResult>,
    pub total: u32,
}

/// Both scoring perspectives for a single win. The non-dealer variant is
/// present only when the winner is not the dealer and won by their own
/// draw, which is when the dealer and the other seats settle differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub dealer: ScoredFans,
    pub non_dealer: Option<ScoredFans>,
}

/// Patterns an umbrella fan nullifies whenever it is achieved, over and
/// above any per-result exclusions the rule itself reports.
fn umbrella_excludes(kind: FanKind) -> &'static [FanKind] {
    match kind {
        FanKind::ThreeConcealedTriplets => &[FanKind::FlatWin],
        FanKind::LittleThreeDragons | FanKind::BigThreeDragons => &[
            FanKind::WhiteDragon,
            FanKind::GreenDragon,
            FanKind::RedDragon,
        ],
        FanKind::LittleFourWinds | FanKind::BigFourWinds => {
            &[FanKind::SeatWind, FanKind::PrevailingWind]
        }
        FanKind::CompleteSeasonSet => &[FanKind::FlowerSeason],
        FanKind::CompletePlantSet => &[FanKind::FlowerPlant],
        _ => &[],
    }
}

/// Runs the given rule slice over the hand and resolves exclusions.
fn resolve(checks: &[FanCheck], ctx: &TableContext, hand: &Hand) -> ScoredFans {
    let results: Vec<FanResult> = checks.iter().map(|check| check(ctx, hand)).collect();

    let mut excluded: HashSet<FanKind> = HashSet::new();
    for result in results.iter().filter(|r| r.achieved) {
        excluded.extend(umbrella_excludes(result.kind));
        excluded.extend(result.excludes.iter().copied());
    }

    let fans: Vec<FanResult> = results
        .into_iter()
        .filter(|r| r.achieved && !excluded.contains(&r.kind))
        .collect();
    let total = total_points(&fans);
    ScoredFans { fans, total }
}

/// Sum of the resolved fan values.
pub fn total_points(fans: &[FanResult]) -> u32 {
    fans.iter().map(|f| f.value).sum()
}

/// Scores with the full catalog, dealer-related rules included.
pub fn score_dealer(ctx: &TableContext, hand: &Hand) -> ScoredFans {
    resolve(&FAN_CATALOG, ctx, hand)
}

/// Scores with the dealer-only rules skipped, for settling against the
/// non-dealer seats.
pub fn score_non_dealer(ctx: &TableContext, hand: &Hand) -> ScoredFans {
    resolve(&FAN_CATALOG[NON_DEALER_SKIP..], ctx, hand)
}

/// Validates the hand, then produces both perspectives.
pub fn settle(ctx: &TableContext, hand: &Hand) -> crate::errors::ScoreResult<Settlement> {
    hand.validate()?;
    let dealer = score_dealer(ctx, hand);
    let non_dealer = if ctx.dealer != Relative::Me && hand.win_type.is_self_drawn() {
        Some(score_non_dealer(ctx, hand))
    } else {
        None
    };
    Ok(Settlement { dealer, non_dealer })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Meld, Source, Wind, WinType};

    fn ctx() -> TableContext {
        TableContext {
            dealer: Relative::Opp,
            dealer_streak: 0,
            seat: Relative::Me,
            prevailing_wind: Wind::East,
        }
    }

    fn kinds(scored: &ScoredFans) -> Vec<FanKind> {
        scored.fans.iter().map(|f| f.kind).collect()
    }

    #[test]
    fn big_three_dragons_excludes_single_dragons() {
        // WWW GGG revealed-equivalent all concealed: 123m WWW GGG RRR + 99p
        let hand = Hand {
            concealed: vec![0, 1, 2, 33, 33, 33, 9],
            revealed: vec![Meld::triplet(31), Meld::triplet(32), Meld::triplet(5)],
            winning_tile: 9,
            win_type: WinType::Discard(Source::Next),
            flowers: vec![],
        };
        let scored = score_non_dealer(&ctx(), &hand);
        let kinds = kinds(&scored);
        assert!(kinds.contains(&FanKind::BigThreeDragons));
        assert!(!kinds.contains(&FanKind::WhiteDragon));
        assert!(!kinds.contains(&FanKind::GreenDragon));
        assert!(!kinds.contains(&FanKind::RedDragon));
    }

    #[test]
    fn complete_season_set_excludes_per_tile_season_fan() {
        let hand = Hand {
            concealed: vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 9, 9, 20, 21, 22, 10],
            revealed: vec![],
            winning_tile: 10,
            win_type: WinType::Discard(Source::Next),
            flowers: (1..=4)
                .map(|i| crate::tile::Flower::new(i).unwrap())
                .collect(),
        };
        let scored = score_non_dealer(&ctx(), &hand);
        let kinds = kinds(&scored);
        assert!(kinds.contains(&FanKind::CompleteSeasonSet));
        assert!(!kinds.contains(&FanKind::FlowerSeason));
    }

    #[test]
    fn streak_fans_both_survive_resolution() {
        let mut c = ctx();
        c.dealer = Relative::Me;
        c.dealer_streak = 2;
        let hand = Hand {
            concealed: vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 9, 9, 20, 21, 22, 10],
            revealed: vec![],
            winning_tile: 10,
            win_type: WinType::SelfDraw,
            flowers: vec![],
        };
        let scored = score_dealer(&c, &hand);
        let kinds = kinds(&scored);
        assert!(kinds.contains(&FanKind::ContinuingDealer));
        assert!(kinds.contains(&FanKind::PullDealer));
    }

    #[test]
    fn non_dealer_variant_skips_dealer_rules() {
        let mut c = ctx();
        c.dealer = Relative::Me;
        c.dealer_streak = 2;
        let hand = Hand {
            concealed: vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 9, 9, 20, 21, 22, 10],
            revealed: vec![],
            winning_tile: 10,
            win_type: WinType::SelfDraw,
            flowers: vec![],
        };
        let scored = score_non_dealer(&c, &hand);
        let kinds = kinds(&scored);
        assert!(!kinds.contains(&FanKind::Dealer));
        assert!(!kinds.contains(&FanKind::ContinuingDealer));
        assert!(!kinds.contains(&FanKind::PullDealer));
    }

    #[test]
    fn total_matches_fan_sum() {
        let hand = Hand {
            concealed: vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 9, 9, 20, 21, 22, 10],
            revealed: vec![],
            winning_tile: 10,
            win_type: WinType::SelfDraw,
            flowers: vec![],
        };
        let scored = score_dealer(&ctx(), &hand);
        assert_eq!(scored.total, total_points(&scored.fans));
        // Scoring is a pure function of its inputs.
        assert_eq!(scored, score_dealer(&ctx(), &hand));
    }

    #[test]
    fn settle_splits_on_non_dealer_self_draw() {
        let hand = Hand {
            concealed: vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 9, 9, 20, 21, 22, 10],
            revealed: vec![],
            winning_tile: 10,
            win_type: WinType::SelfDraw,
            flowers: vec![],
        };
        // Dealer elsewhere + self-draw: both perspectives present.
        let settlement = settle(&ctx(), &hand).unwrap();
        assert!(settlement.non_dealer.is_some());

        // Winner is the dealer: single perspective.
        let mut c = ctx();
        c.dealer = Relative::Me;
        assert!(settle(&c, &hand).unwrap().non_dealer.is_none());

        // Discard win: single perspective.
        let mut discard = hand.clone();
        discard.win_type = WinType::Discard(Source::Prev);
        assert!(settle(&ctx(), &discard).unwrap().non_dealer.is_none());
    }

    #[test]
    fn settle_rejects_malformed_hand() {
        let hand = Hand {
            concealed: vec![0, 1, 2],
            revealed: vec![],
            winning_tile: 10,
            win_type: WinType::SelfDraw,
            flowers: vec![],
        };
        assert!(settle(&ctx(), &hand).is_err());
    }
}
