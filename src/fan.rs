//! Fan rule catalog for Taiwanese scoring.
//!
//! Each rule is a pure function of (table context, hand) returning a
//! [`FanResult`]. Rules never consult each other; overlaps between
//! mutually exclusive patterns are resolved by the engine's exclusion
//! pass, keyed by [`FanKind`]. The catalog order is fixed and matters for
//! display grouping.

use crate::solver;
use crate::tile::{self, Suit};
use crate::types::{Hand, Meld, MeldType, Relative, Source, TableContext, WinType};
use serde::{Deserialize, Serialize};

/// Identity of every scoring pattern. Exclusions between patterns are
/// expressed in terms of these, not display labels, so dynamically
/// suffixed labels (seat wind, flushes, flowers) cannot break matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FanKind {
    Dealer,
    ContinuingDealer,
    PullDealer,
    FullyConcealed,
    NoMeldsSelfDraw,
    SelfDraw,
    SeatWind,
    PrevailingWind,
    FlowerSeason,
    FlowerPlant,
    RobbingKong,
    WhiteDragon,
    GreenDragon,
    RedDragon,
    SingleWait,
    HalfQiu,
    KongDraw,
    FlatWin,
    FullQiu,
    CompleteSeasonSet,
    CompletePlantSet,
    EightFlowers,
    ThreeConcealedTriplets,
    AllTriplets,
    LittleThreeDragons,
    HalfFlush,
    FourConcealedTriplets,
    FiveConcealedTriplets,
    BigThreeDragons,
    LittleFourWinds,
    FullFlush,
    AllHonors,
    BigFourWinds,
}

/// One rule evaluation. Recomputed on every scoring call, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanResult {
    pub kind: FanKind,
    pub achieved: bool,
    /// Point value when achieved (flower fans score per matching tile).
    pub value: u32,
    /// Localized display label, possibly suffixed with a suit or wind.
    pub name: String,
    /// Patterns this result nullifies when achieved, on top of the
    /// engine's built-in umbrella exclusions.
    pub excludes: Vec<FanKind>,
}

fn fan(kind: FanKind, achieved: bool, value: u32, name: impl Into<String>) -> FanResult {
    FanResult {
        kind,
        achieved,
        value,
        name: name.into(),
        excludes: Vec::new(),
    }
}

/// A rule evaluator in the catalog.
pub type FanCheck = fn(&TableContext, &Hand) -> FanResult;

/// Full catalog in display order. The first [`NON_DEALER_SKIP`] entries
/// are the dealer-only rules.
pub const FAN_CATALOG: [FanCheck; 33] = [
    check_dealer,
    check_continuing_dealer,
    check_pull_dealer,
    check_fully_concealed,
    check_no_melds_self_draw,
    check_self_draw,
    check_seat_wind,
    check_prevailing_wind,
    check_flower_season,
    check_flower_plant,
    check_robbing_kong,
    check_white_dragon,
    check_green_dragon,
    check_red_dragon,
    check_single_wait,
    check_half_qiu,
    check_kong_draw,
    check_flat_win,
    check_full_qiu,
    check_complete_season_set,
    check_complete_plant_set,
    check_eight_flowers,
    check_three_concealed_triplets,
    check_all_triplets,
    check_little_three_dragons,
    check_half_flush,
    check_four_concealed_triplets,
    check_five_concealed_triplets,
    check_big_three_dragons,
    check_little_four_winds,
    check_full_flush,
    check_all_honors,
    check_big_four_winds,
];

/// Number of leading dealer-only rules omitted by the non-dealer variant.
pub const NON_DEALER_SKIP: usize = 3;

// ---------------------------------------------------------------------------
// Dealer rules
// ---------------------------------------------------------------------------

/// True when the win direction means the dealer dealt into this hand.
fn dealt_into_by_dealer(ctx: &TableContext, hand: &Hand) -> bool {
    matches!(
        (ctx.dealer, hand.win_type),
        (Relative::Next, WinType::Discard(Source::Next))
            | (Relative::Prev, WinType::Discard(Source::Prev))
            | (Relative::Opp, WinType::Discard(Source::Opp))
    )
}

pub fn check_dealer(ctx: &TableContext, hand: &Hand) -> FanResult {
    let achieved = ctx.dealer == Relative::Me
        || hand.win_type.is_self_drawn()
        || dealt_into_by_dealer(ctx, hand);
    fan(FanKind::Dealer, achieved, 1, "莊家")
}

pub fn check_continuing_dealer(ctx: &TableContext, hand: &Hand) -> FanResult {
    let achieved = ctx.dealer_streak > 0
        && (ctx.dealer == Relative::Me || dealt_into_by_dealer(ctx, hand));
    fan(
        FanKind::ContinuingDealer,
        achieved,
        ctx.dealer_streak as u32,
        "連莊",
    )
}

// Fires under the same trigger as the continuing-dealer rule; the source
// catalog awards both and the resolution engine keeps it that way.
pub fn check_pull_dealer(ctx: &TableContext, hand: &Hand) -> FanResult {
    let achieved = ctx.dealer_streak > 0
        && (ctx.dealer == Relative::Me || dealt_into_by_dealer(ctx, hand));
    fan(
        FanKind::PullDealer,
        achieved,
        ctx.dealer_streak as u32,
        "拉莊",
    )
}

// ---------------------------------------------------------------------------
// Concealment and win-type rules
// ---------------------------------------------------------------------------

pub fn check_fully_concealed(_ctx: &TableContext, hand: &Hand) -> FanResult {
    fan(FanKind::FullyConcealed, hand.is_fully_concealed(), 1, "門清")
}

pub fn check_no_melds_self_draw(_ctx: &TableContext, hand: &Hand) -> FanResult {
    let achieved = hand.is_fully_concealed() && hand.win_type == WinType::SelfDraw;
    fan(FanKind::NoMeldsSelfDraw, achieved, 1, "不求人")
}

pub fn check_self_draw(_ctx: &TableContext, hand: &Hand) -> FanResult {
    fan(FanKind::SelfDraw, hand.win_type.is_self_drawn(), 1, "自摸")
}

pub fn check_robbing_kong(_ctx: &TableContext, hand: &Hand) -> FanResult {
    let achieved = matches!(hand.win_type, WinType::RobbedKong(_));
    fan(FanKind::RobbingKong, achieved, 1, "搶槓")
}

pub fn check_kong_draw(_ctx: &TableContext, hand: &Hand) -> FanResult {
    fan(
        FanKind::KongDraw,
        hand.win_type == WinType::KongDraw,
        1,
        "槓上開花",
    )
}

pub fn check_half_qiu(_ctx: &TableContext, hand: &Hand) -> FanResult {
    // Everything melded away except a single tile, finished by self-draw.
    let achieved = hand.concealed.len() == 1 && hand.win_type.is_self_drawn();
    fan(FanKind::HalfQiu, achieved, 1, "半求")
}

pub fn check_full_qiu(_ctx: &TableContext, hand: &Hand) -> FanResult {
    let achieved = hand.concealed.len() == 1 && !hand.win_type.is_self_drawn();
    fan(FanKind::FullQiu, achieved, 2, "全求")
}

// ---------------------------------------------------------------------------
// Wind rules
// ---------------------------------------------------------------------------

pub fn check_seat_wind(ctx: &TableContext, hand: &Hand) -> FanResult {
    let seat_tile = ctx.seat_wind_tile();
    let achieved = hand.tile_counts()[seat_tile as usize] >= 3;
    fan(
        FanKind::SeatWind,
        achieved,
        1,
        format!("門風（{}風）", tile::wind_label(seat_tile)),
    )
}

pub fn check_prevailing_wind(ctx: &TableContext, hand: &Hand) -> FanResult {
    let wind_tile = ctx.prevailing_wind.tile();
    let achieved = hand.tile_counts()[wind_tile as usize] >= 3;
    fan(
        FanKind::PrevailingWind,
        achieved,
        1,
        format!("場風（{}風）", tile::wind_label(wind_tile)),
    )
}

// ---------------------------------------------------------------------------
// Dragon rules
// ---------------------------------------------------------------------------

pub fn check_white_dragon(_ctx: &TableContext, hand: &Hand) -> FanResult {
    let achieved = hand.tile_counts()[tile::WHITE_DRAGON as usize] >= 3;
    fan(FanKind::WhiteDragon, achieved, 1, "三元牌（白板）")
}

pub fn check_green_dragon(_ctx: &TableContext, hand: &Hand) -> FanResult {
    let achieved = hand.tile_counts()[tile::GREEN_DRAGON as usize] >= 3;
    fan(FanKind::GreenDragon, achieved, 1, "三元牌（青發）")
}

pub fn check_red_dragon(_ctx: &TableContext, hand: &Hand) -> FanResult {
    let achieved = hand.tile_counts()[tile::RED_DRAGON as usize] >= 3;
    fan(FanKind::RedDragon, achieved, 1, "三元牌（紅中）")
}

fn dragon_set_counts(hand: &Hand) -> (u32, bool) {
    let counts = hand.tile_counts();
    let mut triplets = 0;
    let mut pair = false;
    for t in tile::WHITE_DRAGON..=tile::RED_DRAGON {
        if counts[t as usize] >= 3 {
            triplets += 1;
        } else if counts[t as usize] == 2 {
            pair = true;
        }
    }
    (triplets, pair)
}

pub fn check_little_three_dragons(_ctx: &TableContext, hand: &Hand) -> FanResult {
    let (triplets, pair) = dragon_set_counts(hand);
    fan(
        FanKind::LittleThreeDragons,
        triplets == 2 && pair,
        4,
        "小三元",
    )
}

pub fn check_big_three_dragons(_ctx: &TableContext, hand: &Hand) -> FanResult {
    let (triplets, _) = dragon_set_counts(hand);
    fan(FanKind::BigThreeDragons, triplets == 3, 8, "大三元")
}

fn wind_set_counts(hand: &Hand) -> (u32, bool) {
    let counts = hand.tile_counts();
    let mut triplets = 0;
    let mut pair = false;
    for t in tile::EAST..=tile::NORTH {
        if counts[t as usize] >= 3 {
            triplets += 1;
        } else if counts[t as usize] == 2 {
            pair = true;
        }
    }
    (triplets, pair)
}

pub fn check_little_four_winds(_ctx: &TableContext, hand: &Hand) -> FanResult {
    let (triplets, pair) = wind_set_counts(hand);
    fan(FanKind::LittleFourWinds, triplets == 3 && pair, 8, "小四喜")
}

pub fn check_big_four_winds(_ctx: &TableContext, hand: &Hand) -> FanResult {
    let (triplets, _) = wind_set_counts(hand);
    let mut result = fan(FanKind::BigFourWinds, triplets == 4, 16, "大四喜");
    result.excludes = vec![FanKind::SeatWind, FanKind::PrevailingWind];
    result
}

// ---------------------------------------------------------------------------
// Flower rules
// ---------------------------------------------------------------------------

pub fn check_flower_season(ctx: &TableContext, hand: &Hand) -> FanResult {
    let seat = ctx.seat_number();
    let matching = hand
        .flowers
        .iter()
        .filter(|f| f.is_season() && f.id() == seat)
        .count() as u32;
    fan(
        FanKind::FlowerSeason,
        matching > 0,
        matching,
        format!("花牌（{}季）", seat),
    )
}

pub fn check_flower_plant(ctx: &TableContext, hand: &Hand) -> FanResult {
    let seat = ctx.seat_number();
    let matching = hand
        .flowers
        .iter()
        .filter(|f| f.is_plant() && f.id() == seat + 4)
        .count() as u32;
    fan(
        FanKind::FlowerPlant,
        matching > 0,
        matching,
        format!("花牌（{}花）", seat),
    )
}

fn has_flower_run(hand: &Hand, ids: std::ops::RangeInclusive<u8>) -> bool {
    ids.into_iter()
        .all(|n| hand.flowers.iter().any(|f| f.id() == n))
}

pub fn check_complete_season_set(_ctx: &TableContext, hand: &Hand) -> FanResult {
    fan(
        FanKind::CompleteSeasonSet,
        has_flower_run(hand, 1..=4),
        2,
        "花槓（春夏秋冬）",
    )
}

pub fn check_complete_plant_set(_ctx: &TableContext, hand: &Hand) -> FanResult {
    fan(
        FanKind::CompletePlantSet,
        has_flower_run(hand, 5..=8),
        2,
        "花槓（梅蘭竹菊）",
    )
}

pub fn check_eight_flowers(_ctx: &TableContext, hand: &Hand) -> FanResult {
    fan(
        FanKind::EightFlowers,
        has_flower_run(hand, 1..=8),
        8,
        "八仙過海",
    )
}

// ---------------------------------------------------------------------------
// Wait-pattern rules
// ---------------------------------------------------------------------------

pub fn check_single_wait(_ctx: &TableContext, hand: &Hand) -> FanResult {
    let waits = solver::enumerate_waits(&hand.concealed_counts());
    fan(FanKind::SingleWait, waits.len() == 1, 1, "獨聽")
}

pub fn check_flat_win(_ctx: &TableContext, hand: &Hand) -> FanResult {
    let mut result = fan(FanKind::FlatWin, false, 2, "平胡");

    // Discard win only, no flowers, no honors anywhere.
    if hand.win_type.is_self_drawn() || !hand.flowers.is_empty() {
        return result;
    }
    let counts = hand.tile_counts();
    if (tile::HONOR_START as usize..tile::NUM_TILE_KINDS).any(|t| counts[t] > 0) {
        return result;
    }
    if !hand
        .revealed
        .iter()
        .all(|m| m.meld_type == MeldType::Sequence)
    {
        return result;
    }

    // Concealed portion plus the winning tile must be pure sequences.
    let mut concealed = hand.concealed_counts();
    concealed[hand.winning_tile as usize] += 1;
    let total = hand.concealed.len() + 1;
    if (total - 2) % 3 != 0 {
        return result;
    }
    if !solver::can_partition_all_sequences(&concealed, (total - 2) / 3) {
        return result;
    }

    // Two-sided wait at minimum.
    let waits = solver::enumerate_waits(&hand.concealed_counts());
    result.achieved = waits.len() >= 2;
    result
}

// ---------------------------------------------------------------------------
// Triplet-structure rules
// ---------------------------------------------------------------------------

/// Triplets formed entirely from concealed tiles: a kind with 3+ concealed
/// copies not used by any revealed non-kong meld, plus declared concealed
/// kongs. The winning tile does not contribute.
fn concealed_triplet_count(hand: &Hand) -> u32 {
    let mut count = 0;
    for t in 0..tile::NUM_TILE_KINDS as u8 {
        let in_revealed = hand
            .revealed
            .iter()
            .any(|m| !m.is_kong() && m.tiles.contains(&t));
        if hand.concealed_count(t) >= 3 && !in_revealed {
            count += 1;
        }
    }
    count + hand.revealed.iter().filter(|m| m.is_concealed_kong()).count() as u32
}

pub fn check_three_concealed_triplets(_ctx: &TableContext, hand: &Hand) -> FanResult {
    fan(
        FanKind::ThreeConcealedTriplets,
        concealed_triplet_count(hand) == 3,
        2,
        "三暗刻",
    )
}

pub fn check_four_concealed_triplets(_ctx: &TableContext, hand: &Hand) -> FanResult {
    fan(
        FanKind::FourConcealedTriplets,
        concealed_triplet_count(hand) == 4,
        5,
        "四暗刻",
    )
}

pub fn check_five_concealed_triplets(_ctx: &TableContext, hand: &Hand) -> FanResult {
    fan(
        FanKind::FiveConcealedTriplets,
        concealed_triplet_count(hand) == 5,
        8,
        "五暗刻",
    )
}

pub fn check_all_triplets(_ctx: &TableContext, hand: &Hand) -> FanResult {
    let mut result = fan(FanKind::AllTriplets, false, 4, "碰碰胡");

    if !hand.revealed.iter().all(Meld::is_set) {
        return result;
    }

    // Greedy reduction over the physical histogram: strip triplets while
    // possible, then allow a single pair; anything left over fails. Kongs
    // leave a fourth physical copy behind, so a hand with kongs does not
    // reduce cleanly here, matching the source catalog.
    let mut counts = hand.tile_counts();
    let mut pair_found = false;
    for t in 0..tile::NUM_TILE_KINDS {
        while counts[t] >= 3 {
            counts[t] -= 3;
        }
        if counts[t] == 2 && !pair_found {
            pair_found = true;
            counts[t] = 0;
        }
    }
    result.achieved = pair_found && counts.iter().all(|&c| c == 0);
    result
}

// ---------------------------------------------------------------------------
// Suit-composition rules
// ---------------------------------------------------------------------------

fn suit_totals(hand: &Hand) -> [u32; 4] {
    let counts = hand.tile_counts();
    let mut totals = [0u32; 4];
    for (t, &c) in counts.iter().enumerate() {
        totals[tile::suit_of(t as u8) as usize] += c as u32;
    }
    totals
}

fn dominant_suit(totals: &[u32; 4]) -> Suit {
    if totals[Suit::Characters as usize] > 0 {
        Suit::Characters
    } else if totals[Suit::Dots as usize] > 0 {
        Suit::Dots
    } else {
        Suit::Bamboo
    }
}

pub fn check_half_flush(_ctx: &TableContext, hand: &Hand) -> FanResult {
    let totals = suit_totals(hand);
    let suited_present = totals[..3].iter().filter(|&&c| c > 0).count();
    let achieved = totals[Suit::Honor as usize] > 0 && suited_present == 1;
    fan(
        FanKind::HalfFlush,
        achieved,
        4,
        format!("混一色（{}）", dominant_suit(&totals).label()),
    )
}

pub fn check_full_flush(_ctx: &TableContext, hand: &Hand) -> FanResult {
    let totals = suit_totals(hand);
    let suited_present = totals[..3].iter().filter(|&&c| c > 0).count();
    let achieved = totals[Suit::Honor as usize] == 0 && suited_present == 1;
    fan(
        FanKind::FullFlush,
        achieved,
        8,
        format!("清一色（{}）", dominant_suit(&totals).label()),
    )
}

pub fn check_all_honors(_ctx: &TableContext, hand: &Hand) -> FanResult {
    let totals = suit_totals(hand);
    let achieved = totals[..3].iter().all(|&c| c == 0) && totals[Suit::Honor as usize] > 0;
    fan(FanKind::AllHonors, achieved, 8, "字一色")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
