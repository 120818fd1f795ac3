//! Game rendering system (terminal).
//!
//! The simulation hands renderers a read-only `FrameSnapshot`; how it gets
//! displayed is up to the `Renderer` implementation.

use std::io::Write;

use serde::Serialize;

use crate::game::error::Result;
use crate::game::state::GameState;

/// Glyph used for empty cells.
pub const EMPTY_GLYPH: char = '.';

/// Everything a renderer may show for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub frame: u64,
    /// Grid revision; unchanged revision means unchanged cells.
    pub revision: u64,
    pub cooldown: u32,
    /// One glyph per occupied cell, row-major.
    pub cells: Vec<Vec<Option<char>>>,
}

impl FrameSnapshot {
    /// Fails if a cell points at an entity that is no longer in the arena.
    pub fn capture(game_state: &GameState) -> Result<Self> {
        let grid = game_state.grid();
        let mut cells = vec![vec![None; grid.cols()]; grid.rows()];
        for (pos, id) in grid.occupied() {
            cells[pos.row][pos.col] = Some(game_state.entity(id)?.glyph());
        }
        let cooldown = game_state.player_state()?.cooldown;

        Ok(FrameSnapshot {
            rows: grid.rows(),
            cols: grid.cols(),
            frame: game_state.frame(),
            revision: grid.revision(),
            cooldown,
            cells,
        })
    }

    /// Text grid with a border, one glyph per cell, and a status line.
    pub fn to_text(&self) -> String {
        let border = format!("+{}+\n", "-".repeat(self.cols));
        let mut out = String::with_capacity((self.cols + 3) * (self.rows + 3));
        out.push_str(&border);
        for row in &self.cells {
            out.push('|');
            out.extend(row.iter().map(|cell| cell.unwrap_or(EMPTY_GLYPH)));
            out.push_str("|\n");
        }
        out.push_str(&border);
        out.push_str(&format!("frame {}  cooldown {}\n", self.frame, self.cooldown));
        out
    }
}

/// Consumer of per-frame snapshots.
pub trait Renderer {
    fn render(&mut self, snapshot: &FrameSnapshot) -> Result<()>;
}

/// Clears the terminal and prints the grid, skipping frames where nothing
/// visible changed. Lines end in `\r\n` since the terminal is in raw mode.
pub struct TerminalRenderer<W: Write> {
    out: W,
    last: Option<(u64, u32)>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, snapshot: &FrameSnapshot) -> Result<()> {
        let key = (snapshot.revision, snapshot.cooldown);
        if self.last == Some(key) {
            return Ok(());
        }
        self.last = Some(key);

        // Clear screen and home the cursor.
        write!(self.out, "\x1B[2J\x1B[H{}", snapshot.to_text().replace('\n', "\r\n"))?;
        self.out.flush()?;
        Ok(())
    }
}
