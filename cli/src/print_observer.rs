//! An [`Observer`] that prints according to the `-v`/`-H`/`-W` flags.

use log::info;
use shashki_core::{Observer, Position};

pub struct PrintObserver {
    verbose: bool,
    print_cache_hits: bool,
    print_wins: bool,
}

impl PrintObserver {
    pub fn new(verbose: bool, print_cache_hits: bool, print_wins: bool) -> Self {
        Self {
            verbose,
            print_cache_hits,
            print_wins,
        }
    }
}

impl Observer for PrintObserver {
    fn on_visit(&mut self, pos: &Position, depth: u64) {
        if self.verbose {
            info!("[{depth}]\n{pos}");
        }
    }

    fn on_cache_hit(&mut self, pos: &Position, depth: u64) {
        if self.print_cache_hits {
            info!("cache hit [{depth}]\n{pos}");
        }
    }

    fn on_loss(&mut self, path: &[Position]) {
        if self.print_wins {
            if let Some(last) = path.last() {
                info!("terminal at ply {}\n{last}", path.len() - 1);
            }
        }
    }
}
