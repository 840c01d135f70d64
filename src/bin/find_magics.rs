//! Regenerate the magic multipliers used by the sliding attack tables.
//!
//! Usage: `find_magics [seed]`. Prints both tables as Rust constants.

use std::env;
use std::process::ExitCode;

use magic_chess::board::attack_tables::{find_magic, Slider};
use magic_chess::board::Square;
use rand::rngs::StdRng;
use rand::SeedableRng;

const ATTEMPTS: usize = 100_000_000;

fn table(slider: Slider, rng: &mut StdRng) -> Option<Vec<u64>> {
    (0..64u8)
        .map(|index| {
            let square = Square::from_index(index);
            let magic = find_magic(square, slider, rng, ATTEMPTS);
            if magic.is_none() {
                log::error!("no {slider:?} magic found for {square}");
            }
            magic
        })
        .collect()
}

fn print_table(name: &str, magics: &[u64]) {
    println!("pub(crate) const {name}: [u64; 64] = [");
    for magic in magics {
        println!("    0x{magic:016X},");
    }
    println!("];");
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = match env::args().nth(1).map(|s| s.parse::<u64>()) {
        None => 0x5EED,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("invalid seed: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut rng = StdRng::seed_from_u64(seed);

    for (name, slider) in [("ROOK_MAGICS", Slider::Rook), ("BISHOP_MAGICS", Slider::Bishop)] {
        log::info!("searching {slider:?} magics");
        let Some(magics) = table(slider, &mut rng) else {
            return ExitCode::FAILURE;
        };
        print_table(name, &magics);
        println!();
    }
    ExitCode::SUCCESS
}
