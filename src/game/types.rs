use serde::{Serialize, Deserialize};

use crate::config::controls::{KEY_ATTACK, KEY_EAST, KEY_NORTH, KEY_QUIT, KEY_SOUTH, KEY_WEST};

/// Handle into the entity arena owned by `GameState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::North, Direction::South, Direction::East, Direction::West];

    /// Neighbouring cell in this direction, clamped to `[0, rows-1] x [0, cols-1]`.
    /// Moving into a boundary leaves that axis unchanged.
    pub fn step(self, from: Position, rows: usize, cols: usize) -> Position {
        let mut to = from;
        match self {
            Direction::North => {
                if to.row > 0 { to.row -= 1; }
            }
            Direction::South => {
                if to.row + 1 < rows { to.row += 1; }
            }
            Direction::West => {
                if to.col > 0 { to.col -= 1; }
            }
            Direction::East => {
                if to.col + 1 < cols { to.col += 1; }
            }
        }
        to
    }
}

/// Collision category of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Player,
    Enemy,
    Weapon,
    Barrier,
    Neutral,
}

/// What the frame loop hands to the simulation after decoding a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Attack,
    Quit,
}

impl Command {
    /// Decode one input key. Unrecognized keys yield `None` and are ignored.
    pub fn from_key(key: char) -> Option<Command> {
        match key {
            KEY_NORTH => Some(Command::Move(Direction::North)),
            KEY_SOUTH => Some(Command::Move(Direction::South)),
            KEY_WEST => Some(Command::Move(Direction::West)),
            KEY_EAST => Some(Command::Move(Direction::East)),
            KEY_ATTACK => Some(Command::Attack),
            k if k as u32 == KEY_QUIT => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Why a game reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    PlayerDied,
    Quit,
}

/// `Running -> Terminated` state machine inspected by the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Terminated(TerminationReason),
}

/// Result of advancing the simulation by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    GameOver { reason: TerminationReason, frame: u64 },
}
