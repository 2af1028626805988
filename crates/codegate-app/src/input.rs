//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character. Digits type into the focused segment.
    Char(char),
    /// Enter/Return key (verify).
    Enter,
    /// Backspace key (clear segment, or step back from an empty one).
    Backspace,
    /// Delete key (clear the focused segment in place).
    Delete,
    /// Escape key (change number).
    Esc,
    /// Left arrow key (focus previous segment).
    Left,
    /// Right arrow key (focus next segment).
    Right,
    /// Home key (focus first segment).
    Home,
    /// End key (focus last segment).
    End,
}
