//! Host-independent input event types.

/// Key representation the host maps its native key events to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable character
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Shift+Return (line break inside text input)
    ShiftReturn,
    /// Backspace key
    Backspace,
    /// Unmapped or unrecognized key
    Unknown,
}

/// Pointer button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button (also used for touch contacts)
    Left,
    Right,
    Middle,
}
