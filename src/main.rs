use checkers_core::engine::ai::CheckersAi;
use checkers_core::engine::config::EngineConfig;
use checkers_core::logic::board::PieceColor;
use checkers_core::logic::game::{GameOptions, GameState};
use checkers_core::logic::player::PlayerKind;
use std::error::Error;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// Self-play stops here if neither side manages to finish the game.
const MAX_TURNS: u32 = 300;

fn self_play_options() -> GameOptions {
    GameOptions {
        red_name: "Computer (Red)".to_string(),
        red_kind: PlayerKind::Ai {
            depth: 4,
            opening_book: true,
        },
        black_name: "Computer (Black)".to_string(),
        ..GameOptions::default()
    }
}

fn load_options(path: &str) -> Result<GameOptions, Box<dyn Error>> {
    Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
}

fn load_config(path: &str) -> Result<EngineConfig, Box<dyn Error>> {
    Ok(EngineConfig::load_from_json(&std::fs::read_to_string(path)?)?)
}

/// Usage: `checkers [game_options.json] [engine_config.json]`
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let options = args
        .next()
        .map(|path| load_options(&path))
        .transpose()?
        .unwrap_or_else(self_play_options);
    let config = args
        .next()
        .map(|path| load_config(&path))
        .transpose()?
        .unwrap_or_default();
    let config = Arc::new(config);

    let mut game = GameState::with_options(&options);
    // One driver per side so each keeps its own opening line.
    let mut red = CheckersAi::new(config.clone());
    let mut black = CheckersAi::new(config);

    tracing::info!(
        "{} vs {}, {} moves first",
        game.player(PieceColor::Red).name,
        game.player(PieceColor::Black).name,
        game.current_color()
    );

    while !game.is_finished() && game.turn_count() < MAX_TURNS {
        let ai = match game.current_color() {
            PieceColor::Red => &mut red,
            PieceColor::Black => &mut black,
        };
        if ai.make_move(&mut game).is_none() {
            game.check_end_of_game();
        }
        tracing::debug!("\n{}", game.board());
    }

    tracing::info!("Final position:\n{}", game.board());
    if game.is_finished() {
        game.log_result();
    } else {
        tracing::warn!("Stopped after {MAX_TURNS} turns without a result");
    }

    println!("{}", serde_json::to_string_pretty(&game.summary())?);
    Ok(())
}
