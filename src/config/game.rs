//! Game configuration.
//!
//! This module defines the default gameplay parameters (grid dimensions, frame rate,
//! timers) and the `GameConfig` that carries them into `GameState`. Every value is
//! fixed at construction; there is no runtime reconfiguration.

use std::collections::HashSet;

use log::info;
use serde::{Serialize, Deserialize};

use crate::game::error::{GameError, Result};

/// Number of rows in the game grid.
pub const GRID_ROW: usize = 10;

/// Number of columns in the game grid.
pub const GRID_COL: usize = 12;

/// Target frame rate of the main loop, in frames per second.
pub const FRAME_RATE: u32 = 60;

/// Frames between two player attacks (the cooldown is set to this plus one).
pub const ATTACK_PERIOD: u32 = 20;

/// Frames a weapon stays on the grid before expiring.
pub const WEAPON_LIFETIME: u64 = 30;

/// Default enemy speed, in autonomous acts per second.
pub const ENEMY_SPEED: f64 = 1.0;

/// Upper bound on any configured timer, in frames. Larger values are rejected so
/// that expiry and schedule frames stay far from the `u64` limit.
pub const MAX_TIMER_FRAMES: u64 = u32::MAX as u64;

/// Environment variable holding the path of an optional JSON config file.
pub const CONFIG_ENV: &str = "ASCII_GRID_CONFIG";

/// What happens to a weapon when a player or enemy walks into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponContact {
    /// The mover dies and the weapon stays until it expires.
    #[default]
    Persist,
    /// The mover dies and the weapon is spent on contact.
    Consume,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpawn {
    pub name: String,
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub name: String,
    pub row: usize,
    pub col: usize,
    /// Autonomous acts per second. Higher speed means a shorter period.
    #[serde(default = "default_enemy_speed")]
    pub speed: f64,
    /// Explicit period in frames; overrides `speed` when set.
    #[serde(default)]
    pub period: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarrierSpawn {
    pub name: String,
    pub row: usize,
    pub col: usize,
}

/// Initial entity layout. Neutral entities share the barrier spawn shape but
/// absorb weapons differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub player: PlayerSpawn,
    pub enemies: Vec<EnemySpawn>,
    pub barriers: Vec<BarrierSpawn>,
    pub neutrals: Vec<BarrierSpawn>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            player: PlayerSpawn { name: "Br80".to_string(), row: 0, col: 0 },
            enemies: vec![EnemySpawn {
                name: "X".to_string(),
                row: 5,
                col: 0,
                speed: ENEMY_SPEED,
                period: None,
            }],
            barriers: Vec::new(),
            neutrals: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub frame_rate: u32,
    pub attack_period: u32,
    pub weapon_lifetime: u64,
    pub weapon_contact: WeaponContact,
    pub layout: Layout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROW,
            cols: GRID_COL,
            frame_rate: FRAME_RATE,
            attack_period: ATTACK_PERIOD,
            weapon_lifetime: WEAPON_LIFETIME,
            weapon_contact: WeaponContact::default(),
            layout: Layout::default(),
        }
    }
}

fn default_enemy_speed() -> f64 {
    ENEMY_SPEED
}

impl GameConfig {
    /// Parse a JSON config. Missing fields fall back to the defaults above.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file named by `ASCII_GRID_CONFIG`, or the defaults if unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                info!("[Config] Loading {}", path);
                let text = std::fs::read_to_string(&path)?;
                Self::from_json_str(&text)
            }
            Err(_) => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Frames between two acts of an enemy moving `speed` times per second.
    pub fn period_for_speed(&self, speed: f64) -> u64 {
        let period = (self.frame_rate as f64 / speed).round();
        (period as u64).max(1)
    }

    /// Period of a configured enemy, honouring an explicit override.
    pub fn enemy_period(&self, spawn: &EnemySpawn) -> u64 {
        match spawn.period {
            Some(period) => period.max(1),
            None => self.period_for_speed(spawn.speed),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.frame_rate == 0 {
            return Err(GameError::InvalidConfig("frame_rate must be positive".to_string()));
        }
        if self.weapon_lifetime == 0 || self.weapon_lifetime > MAX_TIMER_FRAMES {
            return Err(GameError::InvalidConfig(format!(
                "weapon_lifetime must be in 1..={}, got {}",
                MAX_TIMER_FRAMES, self.weapon_lifetime
            )));
        }
        if self.attack_period == u32::MAX {
            return Err(GameError::InvalidConfig(format!(
                "attack_period must be below {}",
                u32::MAX
            )));
        }

        let mut occupied = HashSet::new();
        let mut claim = |name: &str, row: usize, col: usize| -> Result<()> {
            if name.is_empty() {
                return Err(GameError::InvalidConfig("entity names must not be empty".to_string()));
            }
            if row >= self.rows || col >= self.cols {
                return Err(GameError::InvalidConfig(format!(
                    "{} spawns at ({}, {}) outside the {}x{} grid",
                    name, row, col, self.rows, self.cols
                )));
            }
            if !occupied.insert((row, col)) {
                return Err(GameError::InvalidConfig(format!(
                    "{} spawns on already occupied cell ({}, {})",
                    name, row, col
                )));
            }
            Ok(())
        };

        let player = &self.layout.player;
        claim(&player.name, player.row, player.col)?;
        for enemy in &self.layout.enemies {
            if enemy.period.is_none() && !(enemy.speed > 0.0) {
                return Err(GameError::InvalidConfig(format!(
                    "enemy {} must have a positive speed, got {}",
                    enemy.name, enemy.speed
                )));
            }
            let period = self.enemy_period(enemy);
            if period > MAX_TIMER_FRAMES {
                return Err(GameError::InvalidConfig(format!(
                    "enemy {} acts every {} frames, more than {}",
                    enemy.name, period, MAX_TIMER_FRAMES
                )));
            }
            claim(&enemy.name, enemy.row, enemy.col)?;
        }
        for spawn in self.layout.barriers.iter().chain(&self.layout.neutrals) {
            claim(&spawn.name, spawn.row, spawn.col)?;
        }
        Ok(())
    }
}
