//! Barriers are immutable obstacles with no state of their own.

use crate::game::entities::{Entity, EntityKind};
use crate::game::types::{EntityId, Position};

impl Entity {
    pub fn new_barrier(id: EntityId, name: String, pos: Position) -> Self {
        Self { id, name, pos, kind: EntityKind::Barrier }
    }

    /// Inert occupant: blocks movement, never acts.
    pub fn new_neutral(id: EntityId, name: String, pos: Position) -> Self {
        Self { id, name, pos, kind: EntityKind::Neutral }
    }
}
