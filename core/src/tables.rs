//! Precomputed move tables (component B).
//!
//! All geometry is computed once, at first use, into flat arrays keyed by
//! square index. Hot-path generation is then pure mask arithmetic.

use arrayvec::ArrayVec;
use once_cell::sync::Lazy;

use crate::bitboard::{index_from_xy, item_mask, xy_from_index, Bitmap};

/// One diagonal step, as a coordinate delta.
pub type Direction = (i8, i8);

const UP_LEFT: Direction = (-1, 1);
const UP_RIGHT: Direction = (1, 1);
const DOWN_LEFT: Direction = (-1, -1);
const DOWN_RIGHT: Direction = (1, -1);

/// Forward (toward the opponent's king row) directions, for men.
const FORWARD_DIRECTIONS: [Direction; 2] = [UP_LEFT, UP_RIGHT];

/// All four diagonal directions, for kings and for capturing men.
pub const ALL_DIRECTIONS: [Direction; 4] = [UP_LEFT, UP_RIGHT, DOWN_LEFT, DOWN_RIGHT];

fn step(index: u8, dir: Direction, distance: i8) -> Option<u8> {
    let (x, y) = xy_from_index(index);
    let nx = x as i8 + dir.0 * distance;
    let ny = y as i8 + dir.1 * distance;
    if !(0..8).contains(&nx) || !(0..8).contains(&ny) {
        return None;
    }
    index_from_xy(nx as u8, ny as u8)
}

/// A single man capture: the jumped-over square and the landing square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManCapture {
    pub over_index: u8,
    pub landing_index: u8,
}

/// A king capture ray in one direction: the candidate captured square, and
/// the ordered (increasing distance) list of squares it could land on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KingCaptureRay {
    pub over_index: u8,
    pub landings: ArrayVec<u8, 6>,
}

/// All precomputed per-square move data.
pub struct Tables {
    pub fwd_dst: [ArrayVec<u8, 2>; 32],
    pub fwd_dst_mask: [Bitmap; 32],

    pub man_cap: [ArrayVec<ManCapture, 4>; 32],
    pub man_cap_land_mask: [Bitmap; 32],
    pub man_cap_over_mask: [Bitmap; 32],

    pub king_move: [[ArrayVec<u8, 7>; 4]; 32],
    pub king_move_mask: [Bitmap; 32],

    pub king_cap: [[ArrayVec<KingCaptureRay, 6>; 4]; 32],
    pub king_cap_over_mask: [Bitmap; 32],
    pub king_cap_land_mask: [Bitmap; 32],
}

fn build_tables() -> Tables {
    let mut fwd_dst: [ArrayVec<u8, 2>; 32] = Default::default();
    let mut fwd_dst_mask = [0u32; 32];

    let mut man_cap: [ArrayVec<ManCapture, 4>; 32] = Default::default();
    let mut man_cap_land_mask = [0u32; 32];
    let mut man_cap_over_mask = [0u32; 32];

    let mut king_move: [[ArrayVec<u8, 7>; 4]; 32] = Default::default();
    let mut king_move_mask = [0u32; 32];

    let mut king_cap: [[ArrayVec<KingCaptureRay, 6>; 4]; 32] = Default::default();
    let mut king_cap_over_mask = [0u32; 32];
    let mut king_cap_land_mask = [0u32; 32];

    for index in 0..32u8 {
        for dir in FORWARD_DIRECTIONS {
            if let Some(dst) = step(index, dir, 1) {
                fwd_dst[index as usize].push(dst);
                fwd_dst_mask[index as usize] |= item_mask(dst);
            }
        }

        for dir in ALL_DIRECTIONS {
            if let (Some(over), Some(landing)) = (step(index, dir, 1), step(index, dir, 2)) {
                man_cap[index as usize].push(ManCapture {
                    over_index: over,
                    landing_index: landing,
                });
                man_cap_over_mask[index as usize] |= item_mask(over);
                man_cap_land_mask[index as usize] |= item_mask(landing);
            }
        }

        for (dir_i, dir) in ALL_DIRECTIONS.into_iter().enumerate() {
            for distance in 1..=7i8 {
                if let Some(dst) = step(index, dir, distance) {
                    king_move[index as usize][dir_i].push(dst);
                    king_move_mask[index as usize] |= item_mask(dst);
                }
            }

            for capture_distance in 1..=6i8 {
                let Some(over) = step(index, dir, capture_distance) else {
                    break;
                };
                // A capture needs at least one landing square beyond `over`.
                let Some(first_landing) = step(index, dir, capture_distance + 1) else {
                    break;
                };
                let mut landings = ArrayVec::<u8, 6>::new();
                landings.push(first_landing);
                king_cap_land_mask[index as usize] |= item_mask(first_landing);
                let mut landing_distance = capture_distance + 2;
                while let Some(landing) = step(index, dir, landing_distance) {
                    landings.push(landing);
                    king_cap_land_mask[index as usize] |= item_mask(landing);
                    landing_distance += 1;
                }
                king_cap[index as usize][dir_i].push(KingCaptureRay {
                    over_index: over,
                    landings,
                });
                king_cap_over_mask[index as usize] |= item_mask(over);
            }
        }
    }

    Tables {
        fwd_dst,
        fwd_dst_mask,
        man_cap,
        man_cap_land_mask,
        man_cap_over_mask,
        king_move,
        king_move_mask,
        king_cap,
        king_cap_over_mask,
        king_cap_land_mask,
    }
}

/// The singleton move tables, computed lazily on first access.
pub static TABLES: Lazy<Tables> = Lazy::new(build_tables);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_one_forward_destination() {
        // index 0 is a back-rank corner; only one forward diagonal is on the board.
        assert_eq!(TABLES.fwd_dst[0].len(), 1);
    }

    #[test]
    fn interior_man_has_two_forward_destinations() {
        // find a square with two forward destinations (an interior back-rank square)
        assert!(TABLES.fwd_dst.iter().any(|v| v.len() == 2));
    }

    #[test]
    fn king_move_table_reaches_full_ray_length() {
        // a king placed in a corner should see a full 7-square diagonal in one direction
        assert!(TABLES.king_move[0].iter().any(|dir| dir.len() == 7));
    }

    #[test]
    fn man_capture_pairs_share_diagonal() {
        for square in 0..32usize {
            for cap in &TABLES.man_cap[square] {
                let (ox, oy) = xy_from_index(cap.over_index);
                let (lx, ly) = xy_from_index(cap.landing_index);
                let (sx, sy) = xy_from_index(square as u8);
                assert_eq!(i16::from(lx) - i16::from(sx), 2 * (i16::from(ox) - i16::from(sx)));
                assert_eq!(i16::from(ly) - i16::from(sy), 2 * (i16::from(oy) - i16::from(sy)));
            }
        }
    }
}
