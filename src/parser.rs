//! Text notation for tiles and flowers.
//!
//! Digits accumulate until a category letter flushes them: `123m55p2z`
//! reads as 1m 2m 3m 5p 5p 2z. Categories are `m` (characters), `p`
//! (dots), `s` (bamboo), `z` (honors 1-7), and `f` (flowers 1-8).
//! Whitespace between groups is ignored.

use crate::errors::{ScoreError, ScoreResult};
use crate::tile::{self, Flower};

fn parse_error(input: &str, message: impl Into<String>) -> ScoreError {
    ScoreError::Parse {
        input: input.to_string(),
        message: message.into(),
    }
}

/// Parses a notation string into playable tile indices plus flowers.
pub fn parse_tiles(input: &str) -> ScoreResult<(Vec<u8>, Vec<Flower>)> {
    let mut tiles = Vec::new();
    let mut flowers = Vec::new();
    let mut digits: Vec<u8> = Vec::new();

    for ch in input.chars() {
        match ch {
            '0'..='9' => digits.push(ch as u8 - b'0'),
            'm' | 'p' | 's' | 'z' | 'f' => {
                if digits.is_empty() {
                    return Err(parse_error(input, format!("no digits before '{}'", ch)));
                }
                for &d in &digits {
                    match ch {
                        'f' => match Flower::new(d) {
                            Some(f) => flowers.push(f),
                            None => {
                                return Err(parse_error(input, format!("flower {} out of range", d)))
                            }
                        },
                        _ => tiles.push(tile_from_parts(input, ch, d)?),
                    }
                }
                digits.clear();
            }
            c if c.is_ascii_whitespace() => {
                if !digits.is_empty() {
                    return Err(parse_error(input, "digits not followed by a category"));
                }
            }
            other => return Err(parse_error(input, format!("unexpected character '{}'", other))),
        }
    }
    if !digits.is_empty() {
        return Err(parse_error(input, "trailing digits without a category"));
    }
    Ok((tiles, flowers))
}

fn tile_from_parts(input: &str, category: char, rank: u8) -> ScoreResult<u8> {
    let (start, max) = match category {
        'm' => (tile::CHARACTER_START, 9),
        'p' => (tile::DOT_START, 9),
        's' => (tile::BAMBOO_START, 9),
        'z' => (tile::HONOR_START, 7),
        _ => return Err(parse_error(input, format!("unknown category '{}'", category))),
    };
    if rank < 1 || rank > max {
        return Err(parse_error(
            input,
            format!("rank {} out of range for '{}'", rank, category),
        ));
    }
    Ok(start + rank - 1)
}

/// Parses exactly one playable tile, e.g. `"5p"`.
pub fn parse_tile(input: &str) -> ScoreResult<u8> {
    let (tiles, flowers) = parse_tiles(input)?;
    if tiles.len() != 1 || !flowers.is_empty() {
        return Err(parse_error(input, "expected exactly one tile"));
    }
    Ok(tiles[0])
}

/// Renders tile indices back into notation, one group per suit run.
pub fn render_tiles(tiles: &[u8]) -> String {
    tiles.iter().map(|&t| tile::tile_name(t)).collect::<Vec<_>>().join("")
}
