//! Flags shared by the `dfs` and `mtdfs` subcommands, translated into a
//! [`SearchConfig`].

use std::str::FromStr;

use clap::Args;
use shashki_core::{CacheImpl, HumanDuration, SearchConfig};

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Maximum ply depth to explore.
    #[arg(short = 'd', long = "max-depth", default_value_t = 10)]
    pub max_depth: u64,

    /// Print every visited board as it's reached.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Wall-clock budget for the whole walk, e.g. "500ms", "30s", "5m".
    #[arg(short = 't', long = "timeout", default_value = "10s", value_parser = HumanDuration::from_str)]
    pub timeout: HumanDuration,

    /// Randomize successor order/selection.
    #[arg(short = 'r', long = "randomize")]
    pub randomize: bool,

    /// Maximum number of successors to explore per node (0 = unlimited).
    #[arg(short = 'w', long = "max-width", default_value_t = 0)]
    pub max_width: usize,

    /// Enable the transposition cache and loop detection.
    #[arg(short = 'c', long = "cache")]
    pub cache: bool,

    /// Print every cache hit.
    #[arg(short = 'H', long = "print-cache-hits")]
    pub print_cache_hits: bool,

    /// Print every terminal (loss) board reached.
    #[arg(short = 'W', long = "print-wins")]
    pub print_wins: bool,

    /// Transposition cache backend.
    #[arg(short = 'C', long = "cache-impl", default_value = "trie", value_parser = CacheImpl::from_str)]
    pub cache_impl: CacheImpl,
}

impl SearchArgs {
    pub fn to_config(&self, num_workers: usize) -> SearchConfig {
        SearchConfig {
            max_depth: Some(self.max_depth),
            max_width: self.max_width,
            randomize: self.randomize,
            timeout: Some(self.timeout),
            cache_enabled: self.cache,
            cache_impl: self.cache_impl,
            num_workers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(flatten)]
        search: SearchArgs,
    }

    #[test]
    fn defaults_match_documented_cli_defaults() {
        let h = Harness::parse_from(["shashki"]);
        assert_eq!(h.search.max_depth, 10);
        assert_eq!(h.search.max_width, 0);
        assert!(!h.search.randomize);
        assert!(!h.search.cache);
        assert_eq!(h.search.cache_impl, CacheImpl::Trie);
        assert_eq!(h.search.timeout.0, std::time::Duration::from_secs(10));
    }

    #[test]
    fn to_config_carries_num_workers() {
        let h = Harness::parse_from(["shashki", "-w", "3", "-c"]);
        let config = h.search.to_config(4);
        assert_eq!(config.max_width, 3);
        assert!(config.cache_enabled);
        assert_eq!(config.num_workers, 4);
    }

    #[test]
    fn rejects_unknown_cache_backend() {
        let result = Harness::try_parse_from(["shashki", "-C", "bogus"]);
        assert!(result.is_err());
    }
}
