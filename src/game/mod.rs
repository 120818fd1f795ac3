pub mod types;
pub mod error;
pub mod state;
pub mod input;
pub mod game_loop;

pub mod entities;
pub mod grid;
pub mod systems;
