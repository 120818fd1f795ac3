//! Enemy entity state: a fixed action period and the next frame it may act.

use serde::{Serialize, Deserialize};

use crate::game::entities::{Entity, EntityKind};
use crate::game::types::{EntityId, Position};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyState {
    /// Frames between two autonomous acts.
    pub period: u64,
    pub next_action_frame: u64,
}

impl EnemyState {
    /// First act is due one period after `spawn_frame`.
    pub fn new(period: u64, spawn_frame: u64) -> Self {
        let period = period.max(1);
        Self { period, next_action_frame: spawn_frame.saturating_add(period) }
    }

    pub fn is_due(&self, frame: u64) -> bool {
        frame >= self.next_action_frame
    }

    /// Advance the schedule by exactly one period. Missed periods are not
    /// replayed, so a late enemy acts once and then falls back into step.
    pub fn reschedule(&mut self) {
        self.next_action_frame = self.next_action_frame.saturating_add(self.period);
    }
}

impl Entity {
    pub fn new_enemy(id: EntityId, name: String, pos: Position, period: u64, spawn_frame: u64) -> Self {
        Self { id, name, pos, kind: EntityKind::Enemy(EnemyState::new(period, spawn_frame)) }
    }
}
