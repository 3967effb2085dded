//! Single-threaded depth-first search driver (component F).
//!
//! Cancellation is polled periodically rather than on every node, since an
//! atomic load and a clock read are each too expensive to pay at every one
//! of the millions of nodes a walk can visit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::cache::{Cache, DenseCache, NullCache, StdCache, TrieCache};
use crate::config::{CacheImpl, SearchConfig};
use crate::generator::successors;
use crate::observer::{NullObserver, Observer};
use crate::position::Position;
use crate::stats::Stats;

/// How many nodes pass between cancellation checks.
const POLL_INTERVAL: u64 = 4096;

const MAX_TABLED_ARITY: usize = 32;
const SHUFFLE_VARIANTS: usize = 4;

/// Precomputed shuffles of `0..n` for every arity up to [`MAX_TABLED_ARITY`],
/// a handful of variants each. Avoids calling into the RNG on every shuffled
/// node; the walk just picks a variant and permutes by index.
static SHUFFLE_TABLE: Lazy<Vec<[Vec<u8>; SHUFFLE_VARIANTS]>> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(0x5A17_1234_C0FF_EE00);
    (0..=MAX_TABLED_ARITY)
        .map(|n| {
            std::array::from_fn(|_| {
                let mut v: Vec<u8> = (0..n as u8).collect();
                v.shuffle(&mut rng);
                v
            })
        })
        .collect()
});

pub(crate) fn new_cache(config: &SearchConfig) -> Box<dyn Cache> {
    if !config.cache_enabled {
        return Box::<NullCache>::default();
    }
    match config.cache_impl {
        CacheImpl::Dense => Box::<DenseCache>::default(),
        CacheImpl::Std => Box::<StdCache>::default(),
        CacheImpl::Trie => Box::<TrieCache>::default(),
    }
}

/// The result of a (possibly cancelled) walk.
#[derive(Debug, Clone)]
pub struct DfsOutcome {
    pub stats: Stats,
    /// `false` if the walk was cut short by a stop signal or a timeout,
    /// as opposed to having exhausted the tree.
    pub completed: bool,
}

fn shuffle_in_place(succs: &mut Vec<Position>, variant_seed: u64) {
    let n = succs.len();
    if n < 2 {
        return;
    }
    if n <= MAX_TABLED_ARITY {
        let variant = (variant_seed as usize) % SHUFFLE_VARIANTS;
        let perm = &SHUFFLE_TABLE[n][variant];
        *succs = perm.iter().map(|&i| succs[i as usize]).collect();
    } else {
        succs.shuffle(&mut rand::thread_rng());
    }
}

/// Picks fixed sample positions out of `succs` for `max_width` in
/// `{1, 2, 3}`: `[first]`, `[first, last]`, `[first, middle, last]`
/// respectively, using only the positions available when `n < max_width`.
fn fixed_sample(succs: &[Position], max_width: usize) -> Vec<Position> {
    let n = succs.len();
    if n == 0 {
        return Vec::new();
    }
    match max_width {
        1 => vec![succs[0]],
        2 => {
            if n == 1 {
                vec![succs[0]]
            } else {
                vec![succs[0], succs[n - 1]]
            }
        }
        3 => {
            if n == 1 {
                vec![succs[0]]
            } else if n == 2 {
                vec![succs[0], succs[1]]
            } else {
                let mut idx = vec![0, n / 2, n - 1];
                idx.dedup();
                idx.into_iter().map(|i| succs[i]).collect()
            }
        }
        w => {
            let mut v = succs.to_vec();
            v.truncate(w);
            v
        }
    }
}

/// Applies the successor iteration policy: which of a node's successors to
/// explore, and in what order. Four modes, selected by `(max_width,
/// randomize)`:
/// - `max_width=0, !randomize`: all successors, natural order.
/// - `max_width=0, randomize`: all successors, shuffled.
/// - `max_width>0, randomize`: first `min(max_width, n)` of a shuffled order.
/// - `max_width in {1,2,3}, !randomize`: fixed positional sample (see
///   [`fixed_sample`]); other `max_width` values fall back to a natural-order
///   truncation.
pub(crate) fn select_successors(
    mut succs: Vec<Position>,
    max_width: usize,
    randomize: bool,
    variant_seed: u64,
) -> Vec<Position> {
    if max_width == 0 {
        if randomize {
            shuffle_in_place(&mut succs, variant_seed);
        }
        return succs;
    }
    if randomize {
        shuffle_in_place(&mut succs, variant_seed);
        succs.truncate(max_width.min(succs.len()));
        return succs;
    }
    fixed_sample(&succs, max_width)
}

/// Walks the tree rooted at `root`, starting at ply `depth0`, recording
/// into `stats` and deduplicating via `cache`. Returns `false` if the walk
/// was cancelled before completing.
///
/// Exposed at crate-visibility so [`crate::mtdfs`] can drive many
/// independent walks, one per worker, each with its own cache.
#[allow(clippy::too_many_arguments)]
pub(crate) fn walk(
    root: Position,
    depth0: u64,
    config: &SearchConfig,
    cache: &mut dyn Cache,
    stats: &mut Stats,
    stop: &AtomicBool,
    deadline: Option<Instant>,
    observer: &mut dyn Observer,
) -> bool {
    let mut poll_counter = 0u64;
    let mut path = Vec::new();
    walk_r(
        root,
        depth0,
        config,
        cache,
        stats,
        stop,
        deadline,
        &mut poll_counter,
        observer,
        &mut path,
    )
}

#[allow(clippy::too_many_arguments)]
fn walk_r(
    pos: Position,
    depth: u64,
    config: &SearchConfig,
    cache: &mut dyn Cache,
    stats: &mut Stats,
    stop: &AtomicBool,
    deadline: Option<Instant>,
    poll_counter: &mut u64,
    observer: &mut dyn Observer,
    path: &mut Vec<Position>,
) -> bool {
    *poll_counter += 1;
    if *poll_counter % POLL_INTERVAL == 0 {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        if let Some(dl) = deadline {
            if Instant::now() >= dl {
                return false;
            }
        }
    }

    if cache.insert_seen(pos.fingerprint()) {
        stats.record_cache_hit();
        observer.on_cache_hit(&pos, depth);
        return true;
    }

    observer.on_visit(&pos, depth);
    path.push(pos);

    let succs = successors(&pos);
    let succs = select_successors(succs, config.max_width, config.randomize, stats.total_boards);

    stats.record_board(succs.len());

    if succs.is_empty() {
        stats.record_loss(depth);
        observer.on_loss(path);
        path.pop();
        return true;
    }

    for succ in succs {
        if let Some(max_depth) = config.max_depth {
            if depth + 1 > max_depth {
                stats.record_depth_cutoff();
                continue;
            }
        }
        if !walk_r(
            succ,
            depth + 1,
            config,
            cache,
            stats,
            stop,
            deadline,
            poll_counter,
            observer,
            path,
        ) {
            path.pop();
            return false;
        }
    }
    path.pop();
    true
}

/// Runs a complete single-threaded DFS walk from `root`.
#[must_use]
pub fn dfs(root: Position, config: &SearchConfig, stop: Arc<AtomicBool>) -> DfsOutcome {
    dfs_with_observer(root, config, stop, &mut NullObserver)
}

/// As [`dfs`], but reports every visit, cache hit and loss to `observer`.
#[must_use]
pub fn dfs_with_observer(
    root: Position,
    config: &SearchConfig,
    stop: Arc<AtomicBool>,
    observer: &mut dyn Observer,
) -> DfsOutcome {
    let deadline = config.timeout.map(|d| Instant::now() + d.0);
    let mut cache = new_cache(config);
    let mut stats = Stats::new();

    let completed = walk(
        root,
        0,
        config,
        cache.as_mut(),
        &mut stats,
        &stop,
        deadline,
        observer,
    );

    DfsOutcome { stats, completed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::initial_position;

    fn no_stop() -> Arc<AtomicBool> {
        Arc::new(AtomicBool::new(false))
    }

    #[test]
    fn shallow_walk_completes() {
        let config = SearchConfig {
            max_depth: Some(2),
            ..SearchConfig::default()
        };
        let outcome = dfs(initial_position(), &config, no_stop());
        assert!(outcome.completed);
        assert!(outcome.stats.total_boards > 0);
    }

    #[test]
    fn stop_flag_cancels_walk() {
        let stop = Arc::new(AtomicBool::new(true));
        let config = SearchConfig::default();
        let outcome = dfs(initial_position(), &config, stop);
        // First poll happens after POLL_INTERVAL nodes; a pre-set stop flag
        // is honored once that checkpoint is reached.
        assert!(!outcome.completed);
        assert!(outcome.stats.total_boards >= 1);
    }

    #[test]
    fn max_width_one_bounds_branching_to_a_single_child() {
        let config = SearchConfig {
            max_depth: Some(1),
            max_width: 1,
            ..SearchConfig::default()
        };
        let outcome = dfs(initial_position(), &config, no_stop());
        // Root (depth 0) and its one sampled child (depth 1) are both
        // expanded since both satisfy depth <= max_depth; only the
        // grandchildren (depth 2) get cut off.
        assert_eq!(outcome.stats.total_boards, 2);
        assert_eq!(outcome.stats.branching.get(1).copied().unwrap_or(0), 2);
        assert_eq!(outcome.stats.depth_cutoffs, 1);
    }

    #[test]
    fn root_is_expanded_even_at_max_depth_zero() {
        let config = SearchConfig {
            max_depth: Some(0),
            max_width: 1,
            ..SearchConfig::default()
        };
        let outcome = dfs(initial_position(), &config, no_stop());
        // The root's own branching is always recorded regardless of
        // max_depth; only recursion into its children is cut off.
        assert_eq!(outcome.stats.total_boards, 1);
        assert_eq!(outcome.stats.branching.get(1).copied().unwrap_or(0), 1);
        assert_eq!(outcome.stats.depth_cutoffs, 1);
    }

    #[test]
    fn shuffle_table_covers_small_arities() {
        for n in 0..8usize {
            for variant in &SHUFFLE_TABLE[n] {
                assert_eq!(variant.len(), n);
                let mut sorted = variant.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, (0..n as u8).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn fixed_sample_picks_first_last_middle() {
        let succs: Vec<Position> = (0..7).map(|_| initial_position()).collect();
        assert_eq!(fixed_sample(&succs, 1).len(), 1);
        assert_eq!(fixed_sample(&succs, 2).len(), 2);
        assert_eq!(fixed_sample(&succs, 3).len(), 3);
    }

    #[test]
    fn fixed_sample_handles_fewer_successors_than_width() {
        let succs: Vec<Position> = vec![initial_position()];
        assert_eq!(fixed_sample(&succs, 3).len(), 1);
    }

    #[test]
    fn cache_disabled_does_not_detect_loops() {
        let config = SearchConfig {
            max_depth: Some(2),
            cache_enabled: false,
            ..SearchConfig::default()
        };
        let outcome = dfs(initial_position(), &config, no_stop());
        assert_eq!(outcome.stats.cache_hits, 0);
    }
}
