use plum_core::game_state::chess_types::Square;
use plum_core::moves::magic::{find_magic, Slider};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::process::ExitCode;

const MAX_ATTEMPTS: usize = 100_000_000;

fn parse_arg<T: std::str::FromStr>(args: &[String], idx: usize, default: T) -> T {
    args.get(idx)
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

fn print_table(name: &str, magics: &[u64]) {
    println!("pub const {name}: [u64; 64] = [");
    for magic in magics {
        println!("    0x{magic:016X},");
    }
    println!("];");
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed: u64 = parse_arg(&args, 1, 0x5EED_u64);
    let mut rng = StdRng::seed_from_u64(seed);
    log::info!("searching magics with seed {seed:#x}");

    for (slider, name) in [(Slider::Bishop, "BISHOP_MAGICS"), (Slider::Rook, "ROOK_MAGICS")] {
        let mut magics = Vec::with_capacity(Square::COUNT);
        for square in Square::iter() {
            match find_magic(slider, square, &mut rng, MAX_ATTEMPTS) {
                Some(magic) => {
                    log::info!("{slider:?} {square}: {magic:#018x}");
                    magics.push(magic);
                }
                None => {
                    log::error!("no {slider:?} magic found for {square} in {MAX_ATTEMPTS} attempts");
                    return ExitCode::FAILURE;
                }
            }
        }
        print_table(name, &magics);
    }
    ExitCode::SUCCESS
}
