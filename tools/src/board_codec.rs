//! A flat 32-character board encoding used by `print-board`: one glyph per
//! square index 0..31, in the same glyph set the board printer uses.

use anyhow::{anyhow, Result};
use shashki_core::bitboard::{item_mask, NUM_SQUARES};
use shashki_core::{Position, Side};

pub fn parse_board(s: &str) -> Result<Position> {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() != NUM_SQUARES as usize {
        return Err(anyhow!(
            "expected exactly {NUM_SQUARES} characters, got {}",
            chars.len()
        ));
    }

    let mut mover = Side::default();
    let mut opp = Side::default();
    for (index, &c) in chars.iter().enumerate() {
        let mask = item_mask(index as u8);
        match c {
            '.' | ' ' => {}
            'o' => mover.items |= mask,
            '@' => {
                mover.items |= mask;
                mover.kings |= mask;
            }
            'x' => opp.items |= mask,
            '#' => {
                opp.items |= mask;
                opp.kings |= mask;
            }
            other => return Err(anyhow!("unexpected glyph {other:?} at square {index}")),
        }
    }
    Ok(Position::new(mover, opp))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> String {
        ".".repeat(NUM_SQUARES as usize)
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(parse_board("oxo").is_err());
    }

    #[test]
    fn rejects_unknown_glyph() {
        let mut s = blank();
        s.replace_range(0..1, "?");
        assert!(parse_board(&s).is_err());
    }

    #[test]
    fn places_men_and_kings_on_the_right_side() {
        let mut s = blank();
        s.replace_range(0..1, "o");
        s.replace_range(4..5, "@");
        s.replace_range(8..9, "x");
        s.replace_range(12..13, "#");
        let pos = parse_board(&s).unwrap();
        assert_eq!(pos.mover().items, item_mask(0) | item_mask(4));
        assert_eq!(pos.mover().kings, item_mask(4));
        assert_eq!(pos.opponent().items, item_mask(8) | item_mask(12));
        assert_eq!(pos.opponent().kings, item_mask(12));
    }
}
