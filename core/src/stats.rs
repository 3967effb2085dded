//! Search statistics aggregation (component D).
//!
//! A [`Stats`] accumulates counts during a DFS walk and merges cleanly
//! across parallel workers: every field is either a sum or an
//! element-wise sum of histograms, so `merge` is commutative and
//! associative.

use std::fmt;

/// Aggregated counters for one DFS walk (or the merge of several).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    /// Total number of boards visited (including the root).
    pub total_boards: u64,
    /// `branching[k]` is the number of boards that had exactly `k` legal
    /// successors. Grows on demand as larger branching factors are seen.
    pub branching: Vec<u64>,
    /// Terminal boards (no legal successors) where the mover-to-lose has
    /// had an even number of plies played so far.
    pub losses_even_ply: u64,
    /// Terminal boards where the mover-to-lose has had an odd number of
    /// plies played so far.
    pub losses_odd_ply: u64,
    /// Boards whose continuation was skipped because its fingerprint was
    /// already present in the transposition cache.
    pub cache_hits: u64,
    /// Boards whose continuation was skipped only because the configured
    /// depth limit was reached (not because the game had ended).
    pub depth_cutoffs: u64,
}

impl Stats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one visited board with `branching_factor` legal successors.
    pub fn record_board(&mut self, branching_factor: usize) {
        self.total_boards += 1;
        if self.branching.len() <= branching_factor {
            self.branching.resize(branching_factor + 1, 0);
        }
        self.branching[branching_factor] += 1;
    }

    /// Records a terminal (no-successor) board reached after `ply` plies
    /// from the walk's root.
    pub fn record_loss(&mut self, ply: u64) {
        if ply % 2 == 0 {
            self.losses_even_ply += 1;
        } else {
            self.losses_odd_ply += 1;
        }
    }

    pub fn record_cache_hit(&mut self) {
        self.cache_hits += 1;
    }

    pub fn record_depth_cutoff(&mut self) {
        self.depth_cutoffs += 1;
    }

    /// Total number of terminal (loss) boards seen, of either parity.
    #[must_use]
    pub fn total_losses(&self) -> u64 {
        self.losses_even_ply + self.losses_odd_ply
    }

    /// The largest branching factor observed, or `None` if nothing was
    /// recorded.
    #[must_use]
    pub fn max_branching_factor(&self) -> Option<usize> {
        self.branching
            .iter()
            .enumerate()
            .rev()
            .find(|&(_, &count)| count > 0)
            .map(|(degree, _)| degree)
    }

    /// Folds `other` into `self`. Commutative and associative, so workers
    /// can merge their partial stats in any order.
    pub fn merge(&mut self, other: &Stats) {
        self.total_boards += other.total_boards;
        self.losses_even_ply += other.losses_even_ply;
        self.losses_odd_ply += other.losses_odd_ply;
        self.cache_hits += other.cache_hits;
        self.depth_cutoffs += other.depth_cutoffs;

        if self.branching.len() < other.branching.len() {
            self.branching.resize(other.branching.len(), 0);
        }
        for (degree, count) in other.branching.iter().enumerate() {
            self.branching[degree] += count;
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "boards visited: {}", self.total_boards)?;
        writeln!(
            f,
            "losses: {} (even ply: {}, odd ply: {})",
            self.total_losses(),
            self.losses_even_ply,
            self.losses_odd_ply
        )?;
        writeln!(f, "cache hits: {}", self.cache_hits)?;
        writeln!(f, "depth cutoffs: {}", self.depth_cutoffs)?;
        write!(f, "branching factor histogram:")?;
        for (degree, count) in self.branching.iter().enumerate() {
            if *count > 0 {
                write!(f, " [{degree}]={count}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_board_grows_histogram() {
        let mut s = Stats::new();
        s.record_board(3);
        s.record_board(0);
        assert_eq!(s.total_boards, 2);
        assert_eq!(s.branching, vec![1, 0, 0, 1]);
    }

    #[test]
    fn merge_is_commutative() {
        let mut a = Stats::new();
        a.record_board(2);
        a.record_loss(4);
        let mut b = Stats::new();
        b.record_board(5);
        b.record_loss(3);
        b.record_cache_hit();

        let mut ab = a.clone();
        ab.merge(&b);
        let mut ba = b.clone();
        ba.merge(&a);
        assert_eq!(ab, ba);
    }

    #[test]
    fn merge_sums_histograms_of_different_lengths() {
        let mut a = Stats::new();
        a.record_board(1);
        let mut b = Stats::new();
        b.record_board(4);

        a.merge(&b);
        assert_eq!(a.branching.len(), 5);
        assert_eq!(a.branching[1], 1);
        assert_eq!(a.branching[4], 1);
    }

    #[test]
    fn loss_parity_is_tracked_separately() {
        let mut s = Stats::new();
        s.record_loss(0);
        s.record_loss(1);
        s.record_loss(2);
        assert_eq!(s.losses_even_ply, 2);
        assert_eq!(s.losses_odd_ply, 1);
        assert_eq!(s.total_losses(), 3);
    }

    #[test]
    fn max_branching_factor_ignores_trailing_zeros() {
        let mut s = Stats::new();
        s.record_board(2);
        s.branching.resize(6, 0);
        assert_eq!(s.max_branching_factor(), Some(2));
    }
}
