//! Game entities module.
//!
//! An entity is a tagged variant: shared identity and position plus the
//! per-kind state in `EntityKind`. Behaviour that touches other entities
//! (moving, colliding, dying) lives in `GameState` and the systems, which
//! address entities by `EntityId`.

pub mod player;
pub mod enemy;
pub mod weapon;
pub mod barrier;

pub use player::*;
pub use enemy::*;
pub use weapon::*;

use serde::{Serialize, Deserialize};

use crate::game::types::{Category, EntityId, Position};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntityKind {
    Player(PlayerState),
    Enemy(EnemyState),
    Weapon(WeaponState),
    Barrier,
    Neutral,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub pos: Position,
    pub kind: EntityKind,
}

impl Entity {
    pub fn category(&self) -> Category {
        match self.kind {
            EntityKind::Player(_) => Category::Player,
            EntityKind::Enemy(_) => Category::Enemy,
            EntityKind::Weapon(_) => Category::Weapon,
            EntityKind::Barrier => Category::Barrier,
            EntityKind::Neutral => Category::Neutral,
        }
    }

    /// Display glyph: first character of the name.
    pub fn glyph(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}
