mod print_observer;
mod search_args;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::{Builder, Target};
use log::LevelFilter;

use print_observer::PrintObserver;
use search_args::SearchArgs;
use shashki_core::{dfs_with_observer, initial_position, mtdfs_with_observers, Stats};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
    /// Ambient logging verbosity; repeat to increase (info, debug, trace).
    #[arg(long, action = ArgAction::Count)]
    verbose: u8,
    /// Omit timestamps from log lines.
    #[arg(long, action = ArgAction::SetTrue)]
    no_time: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Single-threaded depth-first exploration.
    Dfs(SearchArgs),
    /// Breadth-first seeded, multi-threaded depth-first exploration.
    Mtdfs(MtdfsArgs),
}

#[derive(clap::Args, Debug)]
struct MtdfsArgs {
    #[command(flatten)]
    search: SearchArgs,
    /// Number of worker threads.
    #[arg(short = 'j', long = "threads", default_value_t = 1)]
    threads: usize,
}

fn init_logging(verbose: u8, no_time: bool) {
    let mut builder = Builder::new();
    builder
        .filter(
            None,
            match verbose {
                0 => LevelFilter::Warn,
                1 => LevelFilter::Info,
                2 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            },
        )
        .default_format()
        .target(Target::Stdout);
    if no_time {
        builder.format_timestamp(None);
    }
    builder.init();
}

fn install_stop_handler() -> Arc<AtomicBool> {
    let stop = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&stop);
    ctrlc::set_handler(move || handler_flag.store(true, std::sync::atomic::Ordering::Relaxed))
        .expect("failed to install SIGINT/SIGTERM handler");
    stop
}

fn print_stats(stats: &Stats, completed: bool) {
    println!("{stats}");
    println!("completed: {completed}");
}

fn run_dfs(args: SearchArgs, stop: Arc<AtomicBool>) {
    let config = args.to_config(1);
    let mut observer = PrintObserver::new(args.verbose, args.print_cache_hits, args.print_wins);
    let outcome = dfs_with_observer(initial_position(), &config, stop, &mut observer);
    print_stats(&outcome.stats, outcome.completed);
}

fn run_mtdfs(args: MtdfsArgs, stop: Arc<AtomicBool>) {
    let config = args.search.to_config(args.threads.max(1));
    let verbose = args.search.verbose;
    let print_cache_hits = args.search.print_cache_hits;
    let print_wins = args.search.print_wins;
    let outcome = mtdfs_with_observers(initial_position(), &config, stop, move || {
        PrintObserver::new(verbose, print_cache_hits, print_wins)
    });
    print_stats(&outcome.stats, outcome.completed);
}

/// Parses arguments, runs the requested search. A bad flag (including an
/// unrecognized `--cache-impl`) and any other usage error share one path:
/// print the message clap built and return an error, so `main` exits 1.
fn run() -> Result<()> {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e)
            if matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            e.print().ok();
            std::process::exit(0);
        }
        Err(e) => {
            e.print().ok();
            return Err(anyhow!("argument error"));
        }
    };
    init_logging(args.verbose, args.no_time);

    let stop = install_stop_handler();
    match args.cmd {
        Cmd::Dfs(search) => run_dfs(search, stop),
        Cmd::Mtdfs(mtdfs) => run_mtdfs(mtdfs, stop),
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
