//! Player entity state: attack cooldown and facing.

use serde::{Serialize, Deserialize};

use crate::game::entities::{Entity, EntityKind};
use crate::game::types::{Direction, EntityId, Position};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Frames left before the next attack is permitted.
    pub cooldown: u32,
    /// Direction of the last move command; attacks land one cell this way.
    pub facing: Direction,
}

impl PlayerState {
    pub fn new() -> Self {
        Self { cooldown: 0, facing: Direction::East }
    }

    pub fn can_attack(&self) -> bool {
        self.cooldown == 0
    }

    /// Called once per frame regardless of input.
    pub fn tick_cooldown(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }

    /// After an attack the next one is allowed `attack_period + 1` frames later.
    pub fn start_cooldown(&mut self, attack_period: u32) {
        self.cooldown = attack_period.saturating_add(1);
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity {
    pub fn new_player(id: EntityId, name: String, pos: Position) -> Self {
        Self { id, name, pos, kind: EntityKind::Player(PlayerState::new()) }
    }
}
