//! Shared types and constants for the falling-block engine.
//!
//! Everything in this crate is plain data: it is used by the core simulation,
//! the terminal view, the input mapping and the JSONL event log alike.
//!
//! # Grid geometry
//!
//! The grid is addressed as `(row, col)` with row 0 at the top:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 23 rows (indexed 0-22)
//! - **Margin**: rows 0-2 are spawn headroom above the 20 playable rows
//! - **Spawn anchor**: `(2, 4)`
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Rotation, Shape, Turn, BOARD_HEIGHT, MARGIN_ROWS};
//!
//! assert_eq!(Shape::T.as_str(), "T");
//!
//! assert_eq!(Rotation::North.turned(Turn::Cw), Rotation::East);
//! assert_eq!(Rotation::North.turned(Turn::Half), Rotation::South);
//!
//! assert_eq!(BOARD_HEIGHT - MARGIN_ROWS, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Total board height in cells, margin included (23 rows)
pub const BOARD_HEIGHT: u8 = 23;

/// Non-playable rows stacked above the playfield (3 rows)
pub const MARGIN_ROWS: u8 = 3;

/// Anchor `(row, col)` where freshly drawn pieces appear
pub const SPAWN_ANCHOR: Coord = (2, 4);

/// Default period between gravity ticks (1000ms)
pub const DEFAULT_GRAVITY_MS: u32 = 1000;

/// Frame interval of the terminal loop in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Absolute grid coordinate `(row, col)`.
pub type Coord = (i8, i8);

/// The seven piece shapes, in catalog order.
///
/// - **O**: 2x2 square, never rotates visually
/// - **I**: 4-long bar
/// - **J**, **L**: mirrored hooks
/// - **S**, **Z**: mirrored skews
/// - **T**: T-shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    O,
    I,
    J,
    L,
    S,
    Z,
    T,
}

impl Shape {
    /// All shapes in catalog order; one bag is a permutation of this array.
    pub const ALL: [Shape; 7] = [
        Shape::O,
        Shape::I,
        Shape::J,
        Shape::L,
        Shape::S,
        Shape::Z,
        Shape::T,
    ];

    /// Position of the shape in [`Shape::ALL`].
    pub fn index(self) -> usize {
        match self {
            Shape::O => 0,
            Shape::I => 1,
            Shape::J => 2,
            Shape::L => 3,
            Shape::S => 4,
            Shape::Z => 5,
            Shape::T => 6,
        }
    }

    /// Upper-case letter shown in the preview panel
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::O => "O",
            Shape::I => "I",
            Shape::J => "J",
            Shape::L => "L",
            Shape::S => "S",
            Shape::Z => "Z",
            Shape::T => "T",
        }
    }
}

/// Rotation states, indexed 0..3
///
/// - **North** (0): spawn orientation
/// - **East** (1): 90° clockwise
/// - **South** (2): 180°
/// - **West** (3): 90° counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotation state index (North = 0 ... West = 3)
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Inverse of [`Rotation::index`], wrapping modulo 4.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// Target state of a turn: `(state + direction) mod 4`
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::{Rotation, Turn};
    ///
    /// assert_eq!(Rotation::West.turned(Turn::Cw), Rotation::North);
    /// assert_eq!(Rotation::North.turned(Turn::Ccw), Rotation::West);
    /// assert_eq!(Rotation::East.turned(Turn::Half), Rotation::West);
    /// ```
    pub fn turned(self, turn: Turn) -> Self {
        let next = (self.index() as i8 + turn.direction()).rem_euclid(4);
        Self::from_index(next as usize)
    }
}

/// A rotation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    /// Clockwise quarter turn (+1)
    Cw,
    /// Counter-clockwise quarter turn (-1)
    Ccw,
    /// Half turn (+2)
    Half,
}

impl Turn {
    /// Signed number of quarter turns.
    pub fn direction(self) -> i8 {
        match self {
            Turn::Cw => 1,
            Turn::Ccw => -1,
            Turn::Half => 2,
        }
    }

    /// Column of this turn in the kick tables.
    pub fn index(self) -> usize {
        match self {
            Turn::Cw => 0,
            Turn::Ccw => 1,
            Turn::Half => 2,
        }
    }
}

/// Player commands accepted by the session
///
/// The gravity tick is not an action: the timer calls `GameState::tick`
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down
    SoftDrop,
    /// Drop the piece to rest and lock it
    HardDrop,
    /// Rotate 90° clockwise
    RotateCw,
    /// Rotate 90° counter-clockwise
    RotateCcw,
    /// Rotate 180°
    Rotate180,
    /// Rebuild the session from its config
    Restart,
}

/// 24-bit RGB color, the display tag carried by every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    ///
    /// ```
    /// use blockfall_types::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#ffaa00"), Some(Rgb::new(255, 170, 0)));
    /// assert_eq!(Rgb::from_hex("nope"), None);
    /// ```
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Color of an empty playable cell
pub const EMPTY_COLOR: Rgb = Rgb::new(0x30, 0x2f, 0x2f);

/// Color of an empty margin cell
pub const MARGIN_COLOR: Rgb = Rgb::new(0x02, 0x0c, 0x18);

/// Emitted once per lock (hard drop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    pub shape: Shape,
    pub rotation: Rotation,
    pub anchor: Coord,
    pub lines_cleared: u32,
    /// Running total after this lock.
    pub total_lines: u32,
    /// The next piece could not be placed at the spawn anchor.
    pub top_out: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_defaults() {
        assert_eq!(BOARD_WIDTH, 10);
        assert_eq!(BOARD_HEIGHT, 23);
        assert_eq!(MARGIN_ROWS, 3);
        assert!(SPAWN_ANCHOR.0 < MARGIN_ROWS as i8);
    }

    #[test]
    fn turns_wrap_modulo_four() {
        for rotation in Rotation::ALL {
            assert_eq!(rotation.turned(Turn::Cw).turned(Turn::Ccw), rotation);
            assert_eq!(rotation.turned(Turn::Half).turned(Turn::Half), rotation);
            assert_eq!(
                rotation.turned(Turn::Cw).turned(Turn::Cw),
                rotation.turned(Turn::Half)
            );
        }
        assert_eq!(Rotation::from_index(7), Rotation::West);
    }

    #[test]
    fn shape_index_follows_catalog_order() {
        for (i, shape) in Shape::ALL.iter().enumerate() {
            assert_eq!(shape.index(), i);
        }
    }

    #[test]
    fn palette_hex_values() {
        assert_eq!(Rgb::from_hex("#302f2f"), Some(EMPTY_COLOR));
        assert_eq!(Rgb::from_hex("020c18"), Some(MARGIN_COLOR));
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("#zz0000"), None);
    }
}
