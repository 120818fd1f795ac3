//! Fixed-timestep frame loop.
//!
//! One tick: poll at most one key, advance the simulation one frame, render,
//! then sleep for whatever is left of the frame budget. A slow tick only
//! delays the next one; frames are never skipped or replayed.

use std::time::{Duration, Instant};

use log::{info, trace, warn};

use crate::game::error::Result;
use crate::game::input::InputSource;
use crate::game::state::GameState;
use crate::game::systems::Renderer;
use crate::game::types::{Command, StepOutcome, TerminationReason};

/// Final result handed back to the caller when the loop ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub reason: TerminationReason,
    pub frame: u64,
}

/// Duration of one frame at `frame_rate` frames per second.
pub fn frame_duration(frame_rate: u32) -> Duration {
    Duration::from_secs_f64(1.0 / frame_rate.max(1) as f64)
}

fn poll_command<I: InputSource>(input: &mut I) -> Option<Command> {
    if !input.is_pending() {
        return None;
    }
    let key = input.next_key()?;
    let command = Command::from_key(key);
    if command.is_none() {
        trace!("[FrameLoop] Ignoring key {:?}", key);
    }
    command
}

/// Run until the player dies or quits.
pub async fn run_game_loop<I, R>(game_state: &mut GameState, input: &mut I, renderer: &mut R) -> Result<GameOver>
where
    I: InputSource,
    R: Renderer,
{
    let budget = frame_duration(game_state.config().frame_rate);
    info!(
        "[FrameLoop] Starting session={} at {} fps",
        game_state.session_id,
        game_state.config().frame_rate
    );
    renderer.render(&game_state.snapshot()?)?;

    loop {
        let start = Instant::now();

        let command = poll_command(input);
        let outcome = game_state.step(command)?;
        renderer.render(&game_state.snapshot()?)?;

        if let StepOutcome::GameOver { reason, frame } = outcome {
            info!("[FrameLoop] Stopped at frame {}: {:?}", frame, reason);
            return Ok(GameOver { reason, frame });
        }

        let elapsed = start.elapsed();
        if elapsed > budget {
            warn!(
                "[FrameLoop] Frame {} took {:.1}ms (budget {:.1}ms)",
                game_state.frame(),
                elapsed.as_secs_f64() * 1000.0,
                budget.as_secs_f64() * 1000.0
            );
        }
        tokio::time::sleep(budget.saturating_sub(elapsed)).await;
    }
}
