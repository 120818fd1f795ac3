/// Main configuration module.
/// 
/// Re-exports submodules for gameplay parameters and key bindings.
pub mod game;
pub mod controls;
