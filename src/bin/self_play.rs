//! Computer-vs-computer demonstration game.
//!
//! `cargo run --release --bin self_play -- [depth] [seed] [max_plies]`
//!
//! White is the alpha-beta engine at `depth`, Black picks random moves from
//! `seed`. Set `RUST_LOG=info` to see each move.

use std::process::ExitCode;

use wake_chess::engines::engine_alpha_beta::AlphaBetaEngine;
use wake_chess::engines::engine_random::RandomEngine;
use wake_chess::engines::engine_trait::{Engine, SearchConstraints};
use wake_chess::game_state::chess_types::Color;
use wake_chess::session::game_session::Game;
use wake_chess::utils::render_game_state::render_game_state;

fn arg_or<T: std::str::FromStr>(index: usize, default: T) -> T {
    std::env::args()
        .nth(index)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn main() -> ExitCode {
    env_logger::init();

    let depth: u8 = arg_or(1, 3);
    let seed: u64 = arg_or(2, 2024);
    let max_plies: usize = arg_or(3, 200);

    let mut white = AlphaBetaEngine::default();
    let mut black = RandomEngine::new(Some(seed));
    let constraints = SearchConstraints::depth(depth);
    let mut game = Game::new();

    for _ in 0..max_plies {
        let engine: &mut dyn Engine = match game.state().side_to_move {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        match game.play_computer_move(engine, &constraints) {
            Ok(Some(outcome)) => {
                if outcome.draw_claim_allowed.is_some() {
                    if let Ok(status) = game.claim_draw() {
                        println!("{status}");
                        break;
                    }
                }
            }
            Ok(None) => break,
            Err(err) if err.is_fatal() => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
            Err(err) => {
                eprintln!("move rejected: {err}");
                break;
            }
        }
    }

    println!("{}", game.san_history().join(" "));
    println!("{}", render_game_state(game.state()));
    match game.status() {
        Ok(status) => println!("{status}"),
        Err(err) => eprintln!("{err}"),
    }
    ExitCode::SUCCESS
}
