mod board_codec;
mod count_positions;
mod dump_tables;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Debug and measurement helpers for shashki_core")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Pretty-print a board from its flat 32-glyph encoding.
    PrintBoard {
        /// 32 characters, one per square index 0..31: '.'/' ' empty,
        /// 'o'/'@' side-to-move man/king, 'x'/'#' opponent man/king.
        board: String,
    },
    /// Dump the precomputed move tables for one square or all of them.
    DumpTables {
        #[arg(long)]
        square: Option<u8>,
    },
    /// Print the combinatorial count of legal-by-shape board configurations.
    CountPositions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::PrintBoard { board } => {
            let pos = board_codec::parse_board(&board)?;
            print!("{pos}");
        }
        Cmd::DumpTables { square } => dump_tables::run(square),
        Cmd::CountPositions => count_positions::run(),
    }
    Ok(())
}
