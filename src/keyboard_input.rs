use crate::error::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, error, info, trace};

/// Source of single-character key symbols for the frame loop
pub trait InputSource {
    /// Wait up to `timeout` for one key. `None` means no key arrived.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<char>>;
}

/// Terminal keyboard reader.
///
/// Puts the terminal in raw mode for the lifetime of the handler so keys arrive
/// without waiting for Enter.
pub struct KeyboardInput;

impl KeyboardInput {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        info!("Raw mode enabled - keyboard handler active");
        Ok(Self)
    }

    /// Translate a key event into the symbol the session understands
    fn translate(code: KeyCode, modifiers: KeyModifiers) -> Option<char> {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some('q'),
            KeyCode::Esc => Some('q'),
            KeyCode::Char(c) => Some(c),
            _ => None,
        }
    }
}

impl InputSource for KeyboardInput {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<char>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            // Only handle key press events (not release)
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                let symbol = Self::translate(key_event.code, key_event.modifiers);
                trace!("Key pressed: {:?} -> {:?}", key_event.code, symbol);
                Ok(symbol)
            }
            _ => Ok(None),
        }
    }
}

impl Drop for KeyboardInput {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            error!("Failed to disable raw mode: {}", e);
        } else {
            debug!("Raw mode disabled");
        }
    }
}

/// Replays a fixed key sequence, one key per poll, then reports no input.
///
/// Used for headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    keys: VecDeque<Option<char>>,
}

impl ScriptedInput {
    pub fn new(keys: impl IntoIterator<Item = char>) -> Self {
        Self {
            keys: keys.into_iter().map(Some).collect(),
        }
    }

    /// Script with explicit idle polls (`None`) between keys
    pub fn with_gaps(keys: impl IntoIterator<Item = Option<char>>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_key(&mut self, _timeout: Duration) -> Result<Option<char>> {
        Ok(self.keys.pop_front().flatten())
    }
}
