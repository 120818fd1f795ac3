//! Input sources for the frame loop.
//!
//! The loop polls once per tick and never blocks: an absent key is the common
//! case, not an error.

#[cfg(test)]
use std::collections::VecDeque;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::{debug, error, warn};

use crate::config::controls::KEY_QUIT;
use crate::game::error::Result;

pub trait InputSource {
    /// Whether a key is waiting to be consumed.
    fn is_pending(&mut self) -> bool;

    /// Consume the next pending key, if any.
    fn next_key(&mut self) -> Option<char>;
}

fn quit_key() -> char {
    char::from_u32(KEY_QUIT).unwrap_or('\u{1b}')
}

/// Map a terminal key event to the character the game understands.
///
/// Releases and repeats are dropped. Ctrl+C maps to the quit key, since raw
/// mode swallows the interrupt signal.
pub fn key_char(key: KeyEvent) -> Option<char> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Esc => Some(quit_key()),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(quit_key()),
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

/// Terminal input in raw mode: single keypresses, no Enter needed.
///
/// Raw mode is enabled on construction and restored on drop. A terminal
/// error is reported as the quit key.
pub struct TerminalInput {
    pending: Option<char>,
}

impl TerminalInput {
    pub fn enable() -> Result<Self> {
        enable_raw_mode()?;
        debug!("[Input] raw mode enabled");
        Ok(Self { pending: None })
    }

    fn poll_key(&mut self) -> std::io::Result<Option<char>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(c) = key_char(key) {
                    return Ok(Some(c));
                }
            }
        }
        Ok(None)
    }
}

impl InputSource for TerminalInput {
    fn is_pending(&mut self) -> bool {
        if self.pending.is_none() {
            self.pending = match self.poll_key() {
                Ok(key) => key,
                Err(e) => {
                    warn!("[Input] terminal read failed: {}", e);
                    Some(quit_key())
                }
            };
        }
        self.pending.is_some()
    }

    fn next_key(&mut self) -> Option<char> {
        self.pending.take()
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            error!("[Input] failed to disable raw mode: {}", e);
        }
    }
}

/// Pre-recorded input: one entry per tick, `None` meaning no key that tick.
/// Once exhausted it yields nothing.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedInput {
    ticks: VecDeque<Option<char>>,
    pending: Option<char>,
}

#[cfg(test)]
impl ScriptedInput {
    pub fn new(ticks: impl IntoIterator<Item = Option<char>>) -> Self {
        Self { ticks: ticks.into_iter().collect(), pending: None }
    }
}

#[cfg(test)]
impl InputSource for ScriptedInput {
    /// Polling consumes the tick's entry; an empty tick simply reports false.
    fn is_pending(&mut self) -> bool {
        if self.pending.is_none() {
            self.pending = self.ticks.pop_front().flatten();
        }
        self.pending.is_some()
    }

    fn next_key(&mut self) -> Option<char> {
        self.pending.take()
    }
}
