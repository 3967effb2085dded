//! Multi-threaded depth-first search driver (component G).
//!
//! A breadth-first pass grows a frontier of positions deep enough to give
//! every worker plenty of independent subtrees, then each worker runs its
//! own single-threaded [`crate::dfs`] walk with its own cache over its
//! share of the frontier. Final stats are merged after all workers join.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use crate::config::SearchConfig;
use crate::dfs::{new_cache, walk, DfsOutcome};
use crate::generator::successors;
use crate::observer::{NullObserver, Observer};
use crate::position::Position;
use crate::stats::Stats;

/// Minimum number of frontier positions to seed per worker before handing
/// subtrees out, matching the source's `min_initial_boards_per_thread`.
const MIN_INITIAL_BOARDS_PER_THREAD: usize = 20;

/// Expands `root` breadth-first until the frontier has at least
/// `target_size` positions, or no further expansion is possible (every
/// frontier position is terminal, or `max_depth` was reached).
///
/// Uses the plain generator with no transposition cache, so the same
/// position reached via two different paths is expanded twice; per the
/// source, this makes seeding statistics approximate, which is acceptable
/// since they are a small fraction of a full walk's total.
fn build_frontier(root: Position, target_size: usize, max_depth: Option<u64>, stats: &mut Stats) -> (Vec<Position>, u64) {
    let mut frontier = vec![root];
    let mut depth = 0u64;

    loop {
        if let Some(md) = max_depth {
            if depth >= md {
                break;
            }
        }

        let mut next = Vec::with_capacity(frontier.len() * 4);
        let mut expanded_any = false;
        for pos in &frontier {
            let succs = successors(pos);
            stats.record_board(succs.len());
            if succs.is_empty() {
                stats.record_loss(depth);
            } else {
                expanded_any = true;
                next.extend(succs);
            }
        }

        if !expanded_any {
            frontier = Vec::new();
            break;
        }
        frontier = next;
        depth += 1;

        if frontier.len() >= target_size {
            break;
        }
    }

    (frontier, depth)
}

/// Round-robin partition of `items` into `num_chunks` roughly equal groups.
fn split_into_chunks(items: Vec<Position>, num_chunks: usize) -> Vec<Vec<Position>> {
    let mut chunks: Vec<Vec<Position>> = (0..num_chunks).map(|_| Vec::new()).collect();
    for (i, item) in items.into_iter().enumerate() {
        chunks[i % num_chunks].push(item);
    }
    chunks
}

/// Runs a complete multi-threaded DFS walk from `root` using
/// `config.num_workers` worker threads.
#[must_use]
pub fn mtdfs(root: Position, config: &SearchConfig, stop: Arc<AtomicBool>) -> DfsOutcome {
    mtdfs_with_observers(root, config, stop, || NullObserver)
}

/// As [`mtdfs`], but calls `make_observer` once per worker thread (observers
/// are not `Send`/`Sync` shared, each worker gets its own) to report every
/// visit, cache hit and loss.
#[must_use]
pub fn mtdfs_with_observers<F, O>(
    root: Position,
    config: &SearchConfig,
    stop: Arc<AtomicBool>,
    make_observer: F,
) -> DfsOutcome
where
    F: Fn() -> O + Sync,
    O: Observer,
{
    let deadline = config.timeout.map(|d| Instant::now() + d.0);
    let num_workers = config.num_workers.max(1);

    let mut merged_stats = Stats::new();
    let (frontier, frontier_depth) = build_frontier(
        root,
        num_workers * MIN_INITIAL_BOARDS_PER_THREAD,
        config.max_depth,
        &mut merged_stats,
    );
    let chunks = split_into_chunks(frontier, num_workers);

    let mut all_completed = true;

    std::thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .into_iter()
            .map(|chunk| {
                let stop = &stop;
                let make_observer = &make_observer;
                scope.spawn(move || {
                    let mut cache = new_cache(config);
                    let mut stats = Stats::new();
                    let mut observer = make_observer();
                    let mut completed = true;
                    for pos in chunk {
                        let ok = walk(
                            pos,
                            frontier_depth,
                            config,
                            cache.as_mut(),
                            &mut stats,
                            stop,
                            deadline,
                            &mut observer,
                        );
                        completed &= ok;
                    }
                    (stats, completed)
                })
            })
            .collect();

        for handle in handles {
            let (stats, completed) = handle.join().expect("dfs worker thread panicked");
            merged_stats.merge(&stats);
            all_completed &= completed;
        }
    });

    DfsOutcome {
        stats: merged_stats,
        completed: all_completed,
    }
}
