//! Move generation, decision-tree search and statistics for Russian
//! draughts (shashki) position trees.

pub mod bitboard;
pub mod cache;
pub mod config;
pub mod dfs;
pub mod error;
pub mod generator;
pub mod mtdfs;
pub mod observer;
pub mod position;
pub mod stats;
pub mod tables;

pub use bitboard::Bitmap;
pub use cache::Cache;
pub use config::{CacheImpl, HumanDuration, SearchConfig};
pub use dfs::{dfs, dfs_with_observer, DfsOutcome};
pub use error::Error;
pub use generator::successors;
pub use mtdfs::{mtdfs, mtdfs_with_observers};
pub use observer::{NullObserver, Observer};
pub use position::{initial_position, Fingerprint, Position, Side};
pub use stats::Stats;
