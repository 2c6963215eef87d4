#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Key events are toolkit-independent: a host translates whatever its
//! windowing layer delivers into a [`KeyEvent`] before dispatching it.
//!
//! Key chords can also be written as text (`"shift+left"`, `"C-Space"`),
//! which is what key scripts and fuzz targets use.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use thiserror::Error;

use crate::geometry::Direction;

/// The key that was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Escape,
    Tab,
    Char(char),
}

impl KeyCode {
    /// The arrow direction of this key, if it is an arrow key.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

impl From<Direction> for KeyCode {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::Up,
            Direction::Down => Self::Down,
            Direction::Left => Self::Left,
            Direction::Right => Self::Right,
        }
    }
}

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE = 0;
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
    }
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a key event without modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Builder: set modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether Ctrl is held.
    #[inline]
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Whether Shift is held.
    #[inline]
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Whether Alt is held.
    #[inline]
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

/// Error returned when a key chord or key script cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseKeyError {
    #[error("empty key chord")]
    Empty,

    #[error("unknown key: {0:?}")]
    UnknownKey(String),

    #[error("unknown modifier: {0:?}")]
    UnknownModifier(String),
}

fn parse_modifier(token: &str) -> Result<Modifiers, ParseKeyError> {
    match token.to_ascii_lowercase().as_str() {
        "s" | "shift" => Ok(Modifiers::SHIFT),
        "c" | "ctrl" | "control" => Ok(Modifiers::CTRL),
        "a" | "alt" => Ok(Modifiers::ALT),
        _ => Err(ParseKeyError::UnknownModifier(token.to_string())),
    }
}

fn parse_code(token: &str) -> Result<KeyCode, ParseKeyError> {
    let mut chars = token.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(ch));
    }
    match token.to_ascii_lowercase().as_str() {
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "space" => Ok(KeyCode::Space),
        "enter" | "return" => Ok(KeyCode::Enter),
        "esc" | "escape" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        _ => Err(ParseKeyError::UnknownKey(token.to_string())),
    }
}

impl FromStr for KeyEvent {
    type Err = ParseKeyError;

    /// Parse a chord such as `"Up"`, `"shift+left"` or `"C-Space"`.
    ///
    /// The last `+`/`-` separated token names the key; the preceding ones
    /// are modifiers. A lone `"+"` or `"-"` is the character key itself.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseKeyError::Empty);
        }
        let last = s.char_indices().last().map_or(0, |(idx, _)| idx);
        let Some(split) = s[..last].rfind(['+', '-']) else {
            return Ok(Self::new(parse_code(s)?));
        };
        let code = parse_code(&s[split + 1..])?;
        let mut modifiers = Modifiers::NONE;
        for token in s[..split].split(['+', '-']) {
            modifiers |= parse_modifier(token)?;
        }
        Ok(Self::new(code).with_modifiers(modifiers))
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl() {
            f.write_str("Ctrl+")?;
        }
        if self.alt() {
            f.write_str("Alt+")?;
        }
        if self.shift() {
            f.write_str("Shift+")?;
        }
        match self.code {
            KeyCode::Up => f.write_str("Up"),
            KeyCode::Down => f.write_str("Down"),
            KeyCode::Left => f.write_str("Left"),
            KeyCode::Right => f.write_str("Right"),
            KeyCode::Space => f.write_str("Space"),
            KeyCode::Enter => f.write_str("Enter"),
            KeyCode::Escape => f.write_str("Escape"),
            KeyCode::Tab => f.write_str("Tab"),
            KeyCode::Char(ch) => write!(f, "{ch}"),
        }
    }
}

/// Parse a key script: chords separated by commas and/or whitespace.
pub fn parse_key_script(script: &str) -> Result<Vec<KeyEvent>, ParseKeyError> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}
