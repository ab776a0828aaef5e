//! Cursor state
//!
//! Manages a cursor **stack**: pushing a type overrides the current
//! cursor, removing it restores whatever was below. A drag pushes Grab on
//! top of the hover hand. The engine maps the active type onto the OS
//! cursor shape each frame.

/// Cursor shapes the game asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorType {
    /// Default arrow
    Standard,
    /// Pointing hand over anything clickable
    Click,
    /// Closed hand while dragging a puzzle piece
    Grab,
}

/// Cursor with a stack for nested states.
#[derive(Debug, Default)]
pub struct GameCursor {
    /// Last entry is the active cursor. Empty stack → Standard.
    history: Vec<CursorType>,
}

impl GameCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current active cursor type (top of stack, or Standard)
    pub fn current(&self) -> CursorType {
        self.history.last().copied().unwrap_or(CursorType::Standard)
    }

    /// Push a cursor type onto the stack (makes it the active cursor).
    pub fn set(&mut self, ct: CursorType) {
        self.history.push(ct);
    }

    /// Clear the entire stack (back to Standard).
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Remove the topmost entry of a specific type
    pub fn remove(&mut self, ct: CursorType) {
        if let Some(idx) = self.history.iter().rposition(|&c| c == ct) {
            self.history.remove(idx);
        }
    }
}
