//! C ABI for external callers: single-ply move generation and a
//! cache-enabled DFS walk with a per-board callback.
//!
//! Positions cross the boundary as a flat `Board` of four bitmaps, always in
//! the caller's fixed visual orientation (white pieces in `w_*`, black in
//! `b_*`); `is_white_turn` says whose turn it is without needing to flip
//! which fields mean what. Internally every ply flips the mover-first
//! orientation ([`Position::rotate`]), so crossing back out means undoing
//! that flip at even parity relative to the root.

use std::mem::ManuallyDrop;
use std::os::raw::{c_int, c_uint};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use shashki_core::{dfs_with_observer, successors, CacheImpl, Observer, Position, SearchConfig, Side};

/// Four 32-bit bitmaps: white/black items and which of those are kings.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Board {
    pub w_items: u32,
    pub w_kings: u32,
    pub b_items: u32,
    pub b_kings: u32,
}

/// An owned, C-visible array of [`Board`], returned by [`generate_moves`] and
/// released by [`free_boards`].
#[repr(C)]
pub struct Boards {
    pub ptr: *mut Board,
    pub len: usize,
    pub cap: usize,
}

/// Invoked once per non-root board during [`walk_all_moves`]; returning `0`
/// stops the walk.
pub type BoardCallback = extern "C" fn(Board, c_uint) -> c_int;

fn board_to_position(b: Board, is_white_turn: c_int) -> Position {
    let white = Side::new(b.w_items, b.w_kings);
    let black = Side::new(b.b_items, b.b_kings);
    if is_white_turn != 0 {
        Position::new(white, black)
    } else {
        Position::new(black, white)
    }
}

/// Maps a position expressed in the root's visual orientation back to a
/// `Board`, using the same mover-is-white convention as the input.
fn position_to_board(pos: Position, is_white_turn: c_int) -> Board {
    let mover = pos.mover();
    let opp = pos.opponent();
    if is_white_turn != 0 {
        Board {
            w_items: mover.items,
            w_kings: mover.kings,
            b_items: opp.items,
            b_kings: opp.kings,
        }
    } else {
        Board {
            w_items: opp.items,
            w_kings: opp.kings,
            b_items: mover.items,
            b_kings: mover.kings,
        }
    }
}

/// The standard starting position, side-to-move on the low squares.
#[no_mangle]
pub extern "C" fn get_initial_board() -> Board {
    position_to_board(shashki_core::initial_position(), 1)
}

/// Writes every legal successor of `b` into `*out`, returns the count, or a
/// negative sentinel if `out` is null.
///
/// # Safety
/// `out` must be a valid, aligned pointer to a `Boards` the caller owns;
/// its previous contents (if any) are overwritten, not freed.
#[no_mangle]
pub unsafe extern "C" fn generate_moves(out: *mut Boards, b: Board, is_white_turn: c_int) -> c_int {
    if out.is_null() {
        return -1;
    }
    let pos0 = board_to_position(b, is_white_turn);
    let boards: Vec<Board> = successors(&pos0)
        .into_iter()
        .map(|s| position_to_board(s.rotate(), is_white_turn))
        .collect();

    let len = boards.len();
    let mut boards = ManuallyDrop::new(boards);
    let ptr = boards.as_mut_ptr();
    let cap = boards.capacity();
    *out = Boards { ptr, len, cap };
    len as c_int
}

/// Releases a [`Boards`] allocated by [`generate_moves`].
///
/// # Safety
/// `out` must point to a `Boards` previously filled in by [`generate_moves`]
/// and not already freed.
#[no_mangle]
pub unsafe extern "C" fn free_boards(out: *mut Boards) {
    if out.is_null() {
        return;
    }
    let b = &*out;
    if !b.ptr.is_null() {
        drop(Vec::from_raw_parts(b.ptr, b.len, b.cap));
    }
}

struct CallbackObserver {
    is_white_turn: c_int,
    callback: BoardCallback,
    stop: Arc<AtomicBool>,
}

impl Observer for CallbackObserver {
    fn on_visit(&mut self, pos: &Position, depth: u64) {
        if depth == 0 {
            return;
        }
        // Every ply flips orientation; an odd number of plies since the
        // root means this position is in the flipped frame, so undo it.
        let in_root_frame = if depth % 2 == 1 { pos.rotate() } else { *pos };
        let board = position_to_board(in_root_frame, self.is_white_turn);
        if (self.callback)(board, depth as c_uint) == 0 {
            self.stop.store(true, Ordering::Relaxed);
        }
    }
}

/// Runs a cache-enabled DFS from `b` up to `max_depth`, calling `callback`
/// for every visited board below the root. Returns `0` if the walk
/// completed, `1` if `callback` returned `0` and stopped it early.
#[no_mangle]
pub extern "C" fn walk_all_moves(
    b: Board,
    is_white_turn: c_int,
    callback: BoardCallback,
    max_depth: c_uint,
) -> c_int {
    let pos0 = board_to_position(b, is_white_turn);
    let stop = Arc::new(AtomicBool::new(false));
    let config = SearchConfig {
        max_depth: Some(max_depth as u64),
        cache_enabled: true,
        cache_impl: CacheImpl::Trie,
        ..SearchConfig::default()
    };
    let mut observer = CallbackObserver {
        is_white_turn,
        callback,
        stop: Arc::clone(&stop),
    };
    let outcome = dfs_with_observer(pos0, &config, stop, &mut observer);
    log::debug!(
        "walk_all_moves: visited {} boards, completed={}",
        outcome.stats.total_boards,
        outcome.completed
    );
    if outcome.completed {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_board_round_trips_through_conversion() {
        let board = get_initial_board();
        let pos = board_to_position(board, 1);
        assert_eq!(pos, shashki_core::initial_position());
    }

    #[test]
    fn generate_moves_reports_opening_branching() {
        let board = get_initial_board();
        let mut out = Boards {
            ptr: std::ptr::null_mut(),
            len: 0,
            cap: 0,
        };
        let count = unsafe { generate_moves(&mut out, board, 1) };
        assert_eq!(count, 7);
        unsafe { free_boards(&mut out) };
    }

    #[test]
    fn generate_moves_rejects_null_out() {
        let board = get_initial_board();
        let count = unsafe { generate_moves(std::ptr::null_mut(), board, 1) };
        assert_eq!(count, -1);
    }

    extern "C" fn count_and_stop(_board: Board, depth: c_uint) -> c_int {
        if depth < 2 {
            1
        } else {
            0
        }
    }

    #[test]
    fn walk_all_moves_stops_when_callback_returns_zero() {
        let board = get_initial_board();
        let status = walk_all_moves(board, 1, count_and_stop, 5);
        assert_eq!(status, 1);
    }
}
