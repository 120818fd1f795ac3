//! Weapon entity state: a stationary hazard that expires after its lifetime.

use serde::{Serialize, Deserialize};

use crate::game::entities::{Entity, EntityKind};
use crate::game::types::{EntityId, Position};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponState {
    pub created_frame: u64,
    pub lifetime: u64,
    pub expiry_frame: u64,
}

impl WeaponState {
    pub fn new(created_frame: u64, lifetime: u64) -> Self {
        Self { created_frame, lifetime, expiry_frame: created_frame.saturating_add(lifetime) }
    }

    /// Present during `[created_frame, expiry_frame)`.
    pub fn is_expired(&self, frame: u64) -> bool {
        frame >= self.expiry_frame
    }
}

impl Entity {
    pub fn new_weapon(id: EntityId, name: String, pos: Position, created_frame: u64, lifetime: u64) -> Self {
        Self { id, name, pos, kind: EntityKind::Weapon(WeaponState::new(created_frame, lifetime)) }
    }
}
