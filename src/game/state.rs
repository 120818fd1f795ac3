use std::collections::HashMap;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::config::game::GameConfig;
use crate::game::entities::{Entity, EntityKind, PlayerState};
use crate::game::error::{GameError, Result};
use crate::game::grid::Grid;
use crate::game::systems::{move_entity, player_attack, run_enemies, run_weapons, FrameSnapshot};
use crate::game::types::{
    Category, Command, Direction, EntityId, Position, RunState, StepOutcome, TerminationReason,
};

/// The simulation: sole owner of the grid and every entity.
///
/// Entities are stored in an arena keyed by `EntityId`; the grid and the
/// enemy/weapon lists only hold handles. All mutation goes through `step`
/// (or the systems it calls), on a single thread.
pub struct GameState {
    pub session_id: Uuid,
    pub(crate) config: GameConfig,
    pub(crate) frame: u64,
    pub(crate) run_state: RunState,
    pub(crate) grid: Grid,
    pub(crate) entities: HashMap<EntityId, Entity>,
    pub(crate) player: EntityId,
    /// Live enemies in spawn order; this order breaks ties between their acts.
    pub(crate) enemies: Vec<EntityId>,
    /// Live weapons in spawn order.
    pub(crate) weapons: Vec<EntityId>,
    pub(crate) rng: StdRng,
    next_id: u32,
}

impl GameState {
    /// Build a game from `config`, seeding enemy movement from the OS.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Build a game with a caller-provided RNG (seeded in tests).
    pub fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;

        let mut state = GameState {
            session_id: Uuid::new_v4(),
            grid: Grid::new(config.rows, config.cols),
            frame: 0,
            run_state: RunState::Running,
            entities: HashMap::new(),
            player: EntityId(0),
            enemies: Vec::new(),
            weapons: Vec::new(),
            rng,
            next_id: 0,
            config,
        };

        let layout = state.config.layout.clone();
        let player_id = state.allocate_id();
        let player = Entity::new_player(
            player_id,
            layout.player.name.clone(),
            Position::new(layout.player.row, layout.player.col),
        );
        state.insert(player)?;
        state.player = player_id;

        for spawn in &layout.enemies {
            let period = state.config.enemy_period(spawn);
            state.spawn_enemy(&spawn.name, Position::new(spawn.row, spawn.col), period)?;
        }
        for spawn in &layout.barriers {
            state.spawn_barrier(&spawn.name, Position::new(spawn.row, spawn.col))?;
        }
        for spawn in &layout.neutrals {
            state.spawn_neutral(&spawn.name, Position::new(spawn.row, spawn.col))?;
        }

        info!(
            "[GameState] New game: session={} grid={}x{} enemies={} barriers={} neutrals={}",
            state.session_id,
            state.config.rows,
            state.config.cols,
            state.enemies.len(),
            layout.barriers.len(),
            layout.neutrals.len()
        );
        Ok(state)
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register an entity and place it on the grid. Its cell must be free.
    pub(crate) fn insert(&mut self, entity: Entity) -> Result<EntityId> {
        let id = entity.id;
        if let Some(occupant) = self.grid.at(entity.pos)? {
            return Err(GameError::InvariantViolation(format!(
                "cannot place {} at ({}, {}): occupied by {}",
                id, entity.pos.row, entity.pos.col, occupant
            )));
        }
        self.grid.set(entity.pos, id)?;
        match entity.kind {
            EntityKind::Enemy(_) => self.enemies.push(id),
            EntityKind::Weapon(_) => self.weapons.push(id),
            EntityKind::Player(_) | EntityKind::Barrier | EntityKind::Neutral => {}
        }
        self.entities.insert(id, entity);
        Ok(id)
    }

    pub fn spawn_enemy(&mut self, name: &str, pos: Position, period: u64) -> Result<EntityId> {
        let id = self.allocate_id();
        let enemy = Entity::new_enemy(id, name.to_string(), pos, period, self.frame);
        self.insert(enemy)?;
        debug!("[GameState] Spawned enemy {} at ({}, {}) period={}", id, pos.row, pos.col, period);
        Ok(id)
    }

    pub fn spawn_barrier(&mut self, name: &str, pos: Position) -> Result<EntityId> {
        let id = self.allocate_id();
        self.insert(Entity::new_barrier(id, name.to_string(), pos))
    }

    pub fn spawn_neutral(&mut self, name: &str, pos: Position) -> Result<EntityId> {
        let id = self.allocate_id();
        self.insert(Entity::new_neutral(id, name.to_string(), pos))
    }

    pub(crate) fn spawn_weapon(&mut self, pos: Position) -> Result<EntityId> {
        let id = self.allocate_id();
        let weapon = Entity::new_weapon(id, "+".to_string(), pos, self.frame, self.config.weapon_lifetime);
        self.insert(weapon)?;
        debug!(
            "[GameState] Weapon {} at ({}, {}) expires at frame {}",
            id,
            pos.row,
            pos.col,
            self.frame.saturating_add(self.config.weapon_lifetime)
        );
        Ok(id)
    }

    /// Remove an entity after a collision or expiry.
    ///
    /// Enemies and weapons leave both their collection and the grid in one step.
    /// The player stays in the arena for display purposes but leaves the grid and
    /// ends the game.
    pub(crate) fn kill(&mut self, id: EntityId) -> Result<()> {
        let (pos, category) = {
            let entity = self.entity(id)?;
            (entity.pos, entity.category())
        };
        self.grid.clear_if(pos, id)?;

        match category {
            Category::Player => {
                info!("[GameState] You have died. frame={}", self.frame);
                self.terminate(TerminationReason::PlayerDied);
                return Ok(());
            }
            Category::Enemy => {
                self.enemies.retain(|e| *e != id);
                debug!("[GameState] Enemy {} died at ({}, {})", id, pos.row, pos.col);
            }
            Category::Weapon => {
                self.weapons.retain(|w| *w != id);
                debug!("[GameState] Weapon {} removed at frame {}", id, self.frame);
            }
            Category::Barrier | Category::Neutral => {
                debug!("[GameState] {:?} {} removed", category, id);
            }
        }
        self.entities.remove(&id);
        Ok(())
    }

    fn terminate(&mut self, reason: TerminationReason) {
        if self.run_state == RunState::Running {
            self.run_state = RunState::Terminated(reason);
            info!(
                "[GameState] Game over: session={} reason={:?} frame={}",
                self.session_id, reason, self.frame
            );
        }
    }

    /// Advance the simulation by exactly one frame.
    ///
    /// Order: frame counter, player cooldown, the pending command, then every
    /// enemy and every weapon in spawn order. Once terminated, further calls
    /// change nothing and keep reporting the same outcome.
    ///
    /// Only attacks wait for the cooldown; a move command is applied on any frame.
    pub fn step(&mut self, input: Option<Command>) -> Result<StepOutcome> {
        if let RunState::Terminated(reason) = self.run_state {
            return Ok(StepOutcome::GameOver { reason, frame: self.frame });
        }

        self.frame += 1;
        self.player_state_mut()?.tick_cooldown();

        match input {
            Some(Command::Quit) => self.terminate(TerminationReason::Quit),
            Some(Command::Move(direction)) => self.move_player(direction)?,
            Some(Command::Attack) => {
                player_attack(self)?;
            }
            None => {}
        }

        if self.is_running() {
            run_enemies(self)?;
            run_weapons(self)?;
        }

        debug_assert!(self.check_occupancy().is_ok(), "{:?}", self.check_occupancy());

        Ok(match self.run_state {
            RunState::Running => StepOutcome::Continue,
            RunState::Terminated(reason) => StepOutcome::GameOver { reason, frame: self.frame },
        })
    }

    fn move_player(&mut self, direction: Direction) -> Result<()> {
        self.player_state_mut()?.facing = direction;
        move_entity(self, self.player, direction)?;
        Ok(())
    }

    /// Verify that grid cells and entity positions agree in both directions.
    pub fn check_occupancy(&self) -> Result<()> {
        let mut seen = 0;
        for (pos, id) in self.grid.occupied() {
            let entity = self.entities.get(&id).ok_or_else(|| {
                GameError::InvariantViolation(format!("cell ({}, {}) holds unknown {}", pos.row, pos.col, id))
            })?;
            if entity.pos != pos {
                return Err(GameError::InvariantViolation(format!(
                    "{} is stored at ({}, {}) but found at ({}, {})",
                    id, entity.pos.row, entity.pos.col, pos.row, pos.col
                )));
            }
            seen += 1;
        }

        let player_on_grid = self.run_state != RunState::Terminated(TerminationReason::PlayerDied);
        let expected = self.entities.len() - usize::from(!player_on_grid);
        if seen != expected {
            return Err(GameError::InvariantViolation(format!(
                "{} entities on the grid, {} expected",
                seen, expected
            )));
        }

        for id in self.enemies.iter().chain(self.weapons.iter()) {
            if !self.entities.contains_key(id) {
                return Err(GameError::InvariantViolation(format!("dangling handle {}", id)));
            }
        }
        Ok(())
    }

    pub fn snapshot(&self) -> Result<FrameSnapshot> {
        FrameSnapshot::capture(self)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn entity(&self, id: EntityId) -> Result<&Entity> {
        self.entities.get(&id).ok_or(GameError::DeadEntity(id))
    }

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        self.entities.get_mut(&id).ok_or(GameError::DeadEntity(id))
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        match self.entities.get(&id) {
            Some(entity) if entity.category() == Category::Player => {
                self.run_state != RunState::Terminated(TerminationReason::PlayerDied)
            }
            Some(_) => true,
            None => false,
        }
    }

    pub fn player_id(&self) -> EntityId {
        self.player
    }

    pub fn player(&self) -> Result<&Entity> {
        self.entity(self.player)
    }

    pub fn player_state(&self) -> Result<&PlayerState> {
        match &self.player()?.kind {
            EntityKind::Player(state) => Ok(state),
            _ => Err(GameError::InvariantViolation(format!("{} is not the player", self.player))),
        }
    }

    pub(crate) fn player_state_mut(&mut self) -> Result<&mut PlayerState> {
        let id = self.player;
        match &mut self.entity_mut(id)?.kind {
            EntityKind::Player(state) => Ok(state),
            _ => Err(GameError::InvariantViolation(format!("{} is not the player", id))),
        }
    }

    pub fn enemies(&self) -> &[EntityId] {
        &self.enemies
    }

    pub fn weapons(&self) -> &[EntityId] {
        &self.weapons
    }
}
