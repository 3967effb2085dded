//! Dumps the precomputed move tables (component B) for debugging table
//! generation, for one square or all 32.

use shashki_core::bitboard::NUM_SQUARES;
use shashki_core::tables::TABLES;

fn dump_square(index: u8) {
    println!("square {index}:");
    println!("  forward moves:  {:?}", TABLES.fwd_dst[index as usize].as_slice());
    println!(
        "  man captures:   {:?}",
        TABLES.man_cap[index as usize]
            .iter()
            .map(|c| (c.over_index, c.landing_index))
            .collect::<Vec<_>>()
    );
    for (dir, rays) in TABLES.king_move[index as usize].iter().enumerate() {
        println!("  king move dir {dir}: {:?}", rays.as_slice());
    }
    for (dir, rays) in TABLES.king_cap[index as usize].iter().enumerate() {
        let rays: Vec<_> = rays
            .iter()
            .map(|r| (r.over_index, r.landings.as_slice().to_vec()))
            .collect();
        println!("  king capture dir {dir}: {rays:?}");
    }
}

pub fn run(square: Option<u8>) {
    match square {
        Some(index) => dump_square(index),
        None => {
            for index in 0..NUM_SQUARES {
                dump_square(index);
            }
        }
    }
}
