/// Key bindings for the terminal front end.
/// Movement uses WASD; every other key is ignored except attack and quit.
pub const KEY_NORTH: char = 'w';
pub const KEY_WEST: char = 'a';
pub const KEY_SOUTH: char = 's';
pub const KEY_EAST: char = 'd';

/// Spawns a weapon on the cell the player faces.
pub const KEY_ATTACK: char = ' ';

/// Ordinal of the quit key (ESC).
pub const KEY_QUIT: u32 = 27;
