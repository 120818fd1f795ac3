//! Entity movement system.
//!
//! This module moves any entity one cell on the grid and applies the collision
//! policy when the target cell is occupied.

use log::trace;

use crate::game::error::Result;
use crate::game::state::GameState;
use crate::game::systems::collision::{resolve_collision, Fate};
use crate::game::types::{Direction, EntityId, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The entity now stands on a new cell.
    Moved(Position),
    /// Boundary or blocking occupant; the entity did not move.
    Stayed,
    /// The entity died entering the target cell and left the grid.
    Died,
}

/// Move `id` one cell in `direction`.
///
/// The target is clamped to the grid, so walking into a wall is a no-op. The
/// mover's cell is vacated first, the target is resolved against its occupant
/// (if any), and a surviving mover is always put back on the grid at its final
/// position, whether or not the move was accepted.
pub fn move_entity(game_state: &mut GameState, id: EntityId, direction: Direction) -> Result<MoveOutcome> {
    let (from, mover) = {
        let entity = game_state.entity(id)?;
        (entity.pos, entity.category())
    };
    let target = direction.step(from, game_state.grid.rows(), game_state.grid.cols());

    game_state.grid.clear(from)?;

    let (advance, mover_fate) = match game_state.grid.at(target)? {
        None => (true, Fate::Survives),
        Some(occupant_id) => {
            let occupant = game_state.entity(occupant_id)?.category();
            let resolution = resolve_collision(mover, occupant, game_state.config.weapon_contact);
            trace!(
                "[Movement] {:?} {} -> {:?} {} at ({}, {}): {:?}",
                mover, id, occupant, occupant_id, target.row, target.col, resolution
            );
            if resolution.occupant == Fate::Dies {
                game_state.kill(occupant_id)?;
            }
            (resolution.mover_advances, resolution.mover)
        }
    };

    if mover_fate == Fate::Dies {
        game_state.kill(id)?;
        return Ok(MoveOutcome::Died);
    }

    let to = if advance { target } else { from };
    game_state.entity_mut(id)?.pos = to;
    game_state.grid.set(to, id)?;

    Ok(if to != from { MoveOutcome::Moved(to) } else { MoveOutcome::Stayed })
}
