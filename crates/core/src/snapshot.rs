use serde::Serialize;

use crate::game_state::Piece;
use crate::types::{Coord, Rgb, Rotation, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub shape: Shape,
    pub rotation: Rotation,
    pub anchor: Coord,
    pub cells: [Coord; 4],
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            shape: value.shape,
            rotation: value.rotation,
            anchor: value.anchor,
            cells: value.cells(),
        }
    }
}

/// What a renderer needs to know about one grid slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellSnapshot {
    pub occupied: bool,
    pub color: Rgb,
}

/// Read-only view of a session, row-major like the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    pub margin_rows: u8,
    /// Includes the projection of the falling piece.
    pub cells: Vec<CellSnapshot>,
    pub active: Option<ActiveSnapshot>,
    /// Cells the active piece would lock into on a hard drop
    pub landing: Option<[Coord; 4]>,
    pub preview: Vec<Shape>,
    pub ticks_enabled: bool,
    pub game_over: bool,
    pub piece_id: u32,
    pub lines: u32,
}

impl GameSnapshot {
    pub fn cell(&self, row: i8, col: i8) -> Option<&CellSnapshot> {
        if row < 0 || col < 0 || row as u8 >= self.height || col as u8 >= self.width {
            return None;
        }
        self.cells
            .get(row as usize * self.width as usize + col as usize)
    }

    pub fn is_margin_row(&self, row: usize) -> bool {
        row < self.margin_rows as usize
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            margin_rows: 0,
            cells: Vec::new(),
            active: None,
            landing: None,
            preview: Vec::new(),
            ticks_enabled: true,
            game_over: false,
            piece_id: 0,
            lines: 0,
        }
    }
}
