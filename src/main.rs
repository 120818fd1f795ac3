//! Main entry point for the grid game.
//!
//! Initializes logging, loads the configuration, and runs the frame loop on a
//! single-threaded tokio runtime until the player dies or quits.

use std::io;

use game::error::GameError;
use game::game_loop::run_game_loop;
use game::input::TerminalInput;
use game::state::GameState;
use game::systems::TerminalRenderer;

pub mod config;
mod game;
mod tests;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), GameError> {
    // Initialize logger from environment variable (logs go to stderr).
    env_logger::init();

    let config = config::game::GameConfig::from_env()?;
    let mut game_state = GameState::new(config)?;

    println!("Move with WASD, attack with SPACE, ESC to quit");

    // Raw mode lasts as long as `input`; it is restored before the final message.
    let over = {
        let mut input = TerminalInput::enable()?;
        let mut renderer = TerminalRenderer::new(io::stdout());
        run_game_loop(&mut game_state, &mut input, &mut renderer).await?
    };

    println!("Game Over! ({:?} at frame {})", over.reason, over.frame);
    Ok(())
}
