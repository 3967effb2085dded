//! Move generation (component C): mandatory captures, multi-jump chains,
//! and simple moves, with capture-chain deduplication.
//!
//! Returned positions are already rotated into the next mover's frame, per
//! [`Position::rotate`].

use arrayvec::ArrayVec;

use crate::bitboard::{is_on_king_row, item_mask, Bitmap};
use crate::position::Position;
use crate::tables::{Direction, ALL_DIRECTIONS, TABLES};

/// All legal successor positions of `pos`, already rotated for the next
/// mover. If any capture is available for the side to move, only capturing
/// moves are returned (captures are mandatory); otherwise all simple moves
/// are returned.
#[must_use]
pub fn successors(pos: &Position) -> Vec<Position> {
    let mut captures = Vec::new();

    let mut men = pos.mover().men();
    while men != 0 {
        let from = men.trailing_zeros() as u8;
        men &= men - 1;
        collect_man_capture_chains(pos, from, &mut captures);
    }

    let mut kings = pos.mover().kings;
    while kings != 0 {
        let from = kings.trailing_zeros() as u8;
        kings &= kings - 1;
        collect_king_capture_chains(pos, from, &mut captures);
    }

    if !captures.is_empty() {
        dedup_by_fingerprint(&mut captures);
        return captures;
    }

    simple_moves(pos)
}

fn simple_moves(pos: &Position) -> Vec<Position> {
    let mut moves = Vec::new();
    let occ = pos.occupied();

    let mut men = pos.mover().men();
    while men != 0 {
        let from = men.trailing_zeros() as u8;
        men &= men - 1;
        for &dst in &TABLES.fwd_dst[from as usize] {
            if occ & item_mask(dst) == 0 {
                moves.push(man_move(pos, from, dst));
            }
        }
    }

    let mut kings = pos.mover().kings;
    while kings != 0 {
        let from = kings.trailing_zeros() as u8;
        kings &= kings - 1;
        for dir in 0..ALL_DIRECTIONS.len() {
            for &dst in &TABLES.king_move[from as usize][dir] {
                if occ & item_mask(dst) != 0 {
                    break;
                }
                moves.push(king_move(pos, from, dst));
            }
        }
    }

    moves
}

fn man_move(pos: &Position, from: u8, to: u8) -> Position {
    let mut next = *pos;
    next.sides[0].items &= !item_mask(from);
    next.sides[0].items |= item_mask(to);
    if is_on_king_row(item_mask(to)) {
        next.sides[0].kings |= item_mask(to);
    }
    next.rotate()
}

fn king_move(pos: &Position, from: u8, to: u8) -> Position {
    let mut next = *pos;
    next.sides[0].items &= !item_mask(from);
    next.sides[0].kings &= !item_mask(from);
    next.sides[0].items |= item_mask(to);
    next.sides[0].kings |= item_mask(to);
    next.rotate()
}

/// Recursively extends a man's capture chain from `from`, appending
/// completed chains (rotated, with end-of-chain promotion applied) to `out`.
fn collect_man_capture_chains(pos: &Position, from: u8, out: &mut Vec<Position>) {
    fn rec(pos: &Position, at: u8, captured_any: bool, out: &mut Vec<Position>) {
        let opp = pos.opponent().items;
        let occ = pos.occupied();
        let mut had_capture = false;

        for cap in &TABLES.man_cap[at as usize] {
            let over_bit = item_mask(cap.over_index);
            let land_bit = item_mask(cap.landing_index);
            if opp & over_bit != 0 && occ & land_bit == 0 {
                had_capture = true;
                let mut next = *pos;
                next.sides[0].items &= !item_mask(at);
                next.sides[0].items |= land_bit;
                next.sides[1].items &= !over_bit;
                next.sides[1].kings &= !over_bit;
                rec(&next, cap.landing_index, true, out);
            }
        }

        if !had_capture && captured_any {
            let mut done = *pos;
            if is_on_king_row(item_mask(at)) {
                done.sides[0].kings |= item_mask(at);
            }
            out.push(done.rotate());
        }
    }

    rec(pos, from, false, out);
}

/// Recursively extends a king's capture chain from `from`. Kings are
/// "flying": they may capture the nearest enemy piece along a ray and land
/// on any empty square beyond it.
fn collect_king_capture_chains(pos: &Position, from: u8, out: &mut Vec<Position>) {
    fn rec(pos: &Position, at: u8, captured_any: bool, out: &mut Vec<Position>) {
        let mut had_capture = false;

        for dir_i in 0..ALL_DIRECTIONS.len() {
            if let Some((over_index, landings)) = nearest_capture(pos, at, dir_i) {
                for &landing in &landings {
                    had_capture = true;
                    let mut next = *pos;
                    next.sides[0].items &= !item_mask(at);
                    next.sides[0].kings &= !item_mask(at);
                    next.sides[0].items |= item_mask(landing);
                    next.sides[0].kings |= item_mask(landing);
                    next.sides[1].items &= !item_mask(over_index);
                    next.sides[1].kings &= !item_mask(over_index);
                    rec(&next, landing, true, out);
                }
            }
        }

        if !had_capture && captured_any {
            out.push(pos.rotate());
        }
    }

    rec(pos, from, false, out);
}

/// Finds the nearest occupied square from `at` in direction `dir_i`. If it
/// holds an opponent piece, returns it along with every empty square beyond
/// it (up to the next blocker or the board edge); returns `None` if the ray
/// is empty all the way to the edge or the nearest piece is the mover's own.
fn nearest_capture(pos: &Position, at: u8, dir_i: usize) -> Option<(u8, ArrayVec<u8, 6>)> {
    let occ = pos.occupied();
    let own = pos.mover().items;

    for ray in &TABLES.king_cap[at as usize][dir_i] {
        if occ & item_mask(ray.over_index) == 0 {
            // Nothing here yet; keep sliding to look for a farther piece,
            // but only if every square strictly between `at` and this one
            // (already implied empty by the table's distance ordering) is
            // also clear - verified by the fact we reached this ray at all.
            continue;
        }
        if own & item_mask(ray.over_index) != 0 {
            return None;
        }
        let mut landings = ArrayVec::<u8, 6>::new();
        for &sq in &ray.landings {
            if occ & item_mask(sq) != 0 {
                break;
            }
            landings.push(sq);
        }
        return if landings.is_empty() {
            None
        } else {
            Some((ray.over_index, landings))
        };
    }
    None
}

fn dedup_by_fingerprint(positions: &mut Vec<Position>) {
    let mut seen_union: (u64, u64) = (0, 0);
    let mut result = Vec::with_capacity(positions.len());

    'outer: for p in positions.drain(..) {
        let fp = p.fingerprint();
        let maybe_dup = fp.0 & seen_union.0 == fp.0 && fp.1 & seen_union.1 == fp.1;
        if maybe_dup {
            for existing in &result {
                let existing: &Position = existing;
                if existing.fingerprint() == fp {
                    continue 'outer;
                }
            }
        }
        seen_union.0 |= fp.0;
        seen_union.1 |= fp.1;
        result.push(p);
    }

    *positions = result;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::initial_position;

    #[test]
    fn opening_has_seven_moves_per_side() {
        let moves = successors(&initial_position());
        assert_eq!(moves.len(), 7);
    }

    #[test]
    fn opening_moves_are_non_captures() {
        let before = initial_position();
        for after in successors(&before) {
            assert_eq!(before.mover().piece_count(), after.opponent().piece_count());
        }
    }

    #[test]
    fn capture_is_mandatory() {
        // Mover has a man one diagonal step from an opponent man, with an
        // empty landing square beyond it: only the capturing move is legal.
        let mover = crate::position::Side::new(item_mask(9), 0);
        let opp = crate::position::Side::new(item_mask(13), 0);
        let pos = Position::new(mover, opp);
        let moves = successors(&pos);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].opponent().piece_count(), 0);
    }

    #[test]
    fn no_direction_vector_is_reused_as_a_square_index() {
        // guards against accidentally treating `Direction` as a square index
        let _d: Direction = (1, 1);
    }
}
