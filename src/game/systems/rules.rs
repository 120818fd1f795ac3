//! Timer-driven rules: player attacks, enemy wandering and weapon expiry.

use log::{debug, trace};
use rand::seq::IteratorRandom;

use crate::game::entities::EntityKind;
use crate::game::error::Result;
use crate::game::state::GameState;
use crate::game::systems::collision::{resolve_collision, Fate};
use crate::game::systems::movement::{move_entity, MoveOutcome};
use crate::game::types::{Category, Direction, EntityId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    Spawned(EntityId),
    /// Cooldown still running.
    OnCooldown,
    /// The player faces the edge of the grid.
    NoRoom,
    /// The forward cell holds something a weapon cannot displace.
    Blocked,
}

/// Spawn a weapon on the cell the player faces.
///
/// An enemy standing there is destroyed first. Rejected attacks leave the
/// cooldown untouched.
pub fn player_attack(game_state: &mut GameState) -> Result<AttackOutcome> {
    let (origin, facing, ready) = {
        let player = game_state.player()?;
        let state = game_state.player_state()?;
        (player.pos, state.facing, state.can_attack())
    };
    if !ready {
        trace!("[Rules] Attack ignored, cooldown={}", game_state.player_state()?.cooldown);
        return Ok(AttackOutcome::OnCooldown);
    }

    let target = facing.step(origin, game_state.grid.rows(), game_state.grid.cols());
    if target == origin {
        trace!("[Rules] Attack ignored, facing {:?} at the edge", facing);
        return Ok(AttackOutcome::NoRoom);
    }

    if let Some(occupant_id) = game_state.grid.at(target)? {
        let occupant = game_state.entity(occupant_id)?.category();
        let resolution = resolve_collision(Category::Weapon, occupant, game_state.config.weapon_contact);
        if resolution.occupant != Fate::Dies {
            trace!("[Rules] Attack blocked by {:?} {}", occupant, occupant_id);
            return Ok(AttackOutcome::Blocked);
        }
        game_state.kill(occupant_id)?;
    }

    let weapon = game_state.spawn_weapon(target)?;
    let attack_period = game_state.config.attack_period;
    game_state.player_state_mut()?.start_cooldown(attack_period);
    Ok(AttackOutcome::Spawned(weapon))
}

/// One enemy turn: if its action frame has come, step once in a random direction.
///
/// Candidates are the directions that leave the current cell and do not run
/// into a barrier or neutral entity; one is chosen uniformly. Other enemies
/// still count as candidates since they may move away. The schedule advances
/// by one period per act, never more.
pub fn enemy_act(game_state: &mut GameState, id: EntityId) -> Result<Option<MoveOutcome>> {
    let frame = game_state.frame;
    let (pos, due) = {
        let enemy = game_state.entity(id)?;
        match &enemy.kind {
            EntityKind::Enemy(state) => (enemy.pos, state.is_due(frame)),
            _ => return Ok(None),
        }
    };
    if !due {
        return Ok(None);
    }

    if let EntityKind::Enemy(state) = &mut game_state.entity_mut(id)?.kind {
        state.reschedule();
    }

    let (rows, cols) = (game_state.grid.rows(), game_state.grid.cols());
    let mut candidates = Vec::with_capacity(Direction::ALL.len());
    for direction in Direction::ALL {
        let target = direction.step(pos, rows, cols);
        if target == pos {
            continue;
        }
        if let Some(occupant) = game_state.grid.at(target)? {
            if matches!(game_state.entity(occupant)?.category(), Category::Barrier | Category::Neutral) {
                continue;
            }
        }
        candidates.push(direction);
    }
    let direction = candidates.into_iter().choose(&mut game_state.rng);

    match direction {
        Some(direction) => {
            let outcome = move_entity(game_state, id, direction)?;
            trace!("[Rules] Enemy {} frame={} {:?}: {:?}", id, frame, direction, outcome);
            Ok(Some(outcome))
        }
        None => Ok(Some(MoveOutcome::Stayed)),
    }
}

/// Remove the weapon once its lifetime has run out.
pub fn weapon_act(game_state: &mut GameState, id: EntityId) -> Result<bool> {
    let expired = match &game_state.entity(id)?.kind {
        EntityKind::Weapon(state) => state.is_expired(game_state.frame),
        _ => false,
    };
    if expired {
        debug!("[Rules] Weapon {} expired at frame {}", id, game_state.frame);
        game_state.kill(id)?;
    }
    Ok(expired)
}

/// Let every enemy act once, in spawn order.
///
/// Iterates over a copy of the handle list taken up front; enemies killed
/// earlier in the pass are skipped.
pub fn run_enemies(game_state: &mut GameState) -> Result<()> {
    let snapshot = game_state.enemies.clone();
    for id in snapshot {
        if game_state.entities.contains_key(&id) {
            enemy_act(game_state, id)?;
        }
    }
    Ok(())
}

/// Let every weapon check its expiry, in spawn order.
pub fn run_weapons(game_state: &mut GameState) -> Result<()> {
    let snapshot = game_state.weapons.clone();
    for id in snapshot {
        if game_state.entities.contains_key(&id) {
            weapon_act(game_state, id)?;
        }
    }
    Ok(())
}
