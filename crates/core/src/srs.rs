//! Rotation with kick-table fallback.
//!
//! A rotation is tested at the target state first in place, then at each kick
//! offset in table order. The first placement that passes the collision test
//! is committed; if none does, the caller leaves the piece untouched.
//!
//! Kick offsets are SRS `(x, y)` pairs: x to the right, y upward. On the grid
//! that is `col += x`, `row -= y`.
//!
//! Tables are indexed `[from_state][turn]`. Neither table has half-turn
//! entries, so a 180° request for anything but O has no candidates and is
//! rejected.

use crate::types::{Coord, Rotation, Shape, Turn};

/// `(x, y)` kick offset
pub type Kick = (i8, i8);

/// Candidate lists for each `(from_state, turn)` pair
pub type KickTable = [[&'static [Kick]; 3]; 4];

/// Which kick table a shape uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickClass {
    /// O never moves when rotated
    O,
    /// I has its own table
    I,
    /// J, L, S, T and Z share one table
    Jlstz,
}

impl KickClass {
    pub fn of(shape: Shape) -> Self {
        match shape {
            Shape::O => KickClass::O,
            Shape::I => KickClass::I,
            Shape::J | Shape::L | Shape::S | Shape::T | Shape::Z => KickClass::Jlstz,
        }
    }
}

const IN_PLACE: &[Kick] = &[(0, 0)];
const NO_KICKS: &[Kick] = &[];

const O_KICKS: KickTable = [[IN_PLACE; 3]; 4];

const JLSTZ_KICKS: KickTable = [
    // North: ->East, ->West, half
    [
        &[(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        &[(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
        NO_KICKS,
    ],
    // East: ->South, ->North, half
    [
        &[(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        &[(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        NO_KICKS,
    ],
    // South: ->West, ->East, half
    [
        &[(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
        &[(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        NO_KICKS,
    ],
    // West: ->North, ->South, half
    [
        &[(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        &[(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        NO_KICKS,
    ],
];

const I_KICKS: KickTable = [
    [
        &[(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
        &[(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
        NO_KICKS,
    ],
    [
        &[(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
        &[(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
        NO_KICKS,
    ],
    [
        &[(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
        &[(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
        NO_KICKS,
    ],
    [
        &[(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
        &[(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
        NO_KICKS,
    ],
];

pub fn get_kick_table(class: KickClass) -> &'static KickTable {
    match class {
        KickClass::O => &O_KICKS,
        KickClass::I => &I_KICKS,
        KickClass::Jlstz => &JLSTZ_KICKS,
    }
}

/// Ordered candidates for rotating `shape` out of `from` by `turn`.
///
/// Empty when the table has no entry (half turns of I and JLSTZ).
pub fn kicks(shape: Shape, from: Rotation, turn: Turn) -> &'static [Kick] {
    get_kick_table(KickClass::of(shape))[from.index()][turn.index()]
}

/// Anchor after applying a kick.
pub fn apply_kick(anchor: Coord, (x, y): Kick) -> Coord {
    (anchor.0 - y, anchor.1 + x)
}

/// A committed rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationResult {
    pub rotation: Rotation,
    pub anchor: Coord,
    /// Position of the winning candidate in its kick list (0 = in place).
    pub kick_index: usize,
}

/// Try to rotate a piece with kicks
///
/// `can_place(rotation, anchor)` is the collision test for a candidate
/// placement. Returns `None` when every candidate fails.
pub fn try_rotate(
    shape: Shape,
    rotation: Rotation,
    anchor: Coord,
    turn: Turn,
    can_place: impl Fn(Rotation, Coord) -> bool,
) -> Option<RotationResult> {
    let target = rotation.turned(turn);

    kicks(shape, rotation, turn)
        .iter()
        .enumerate()
        .map(|(kick_index, &kick)| RotationResult {
            rotation: target,
            anchor: apply_kick(anchor, kick),
            kick_index,
        })
        .find(|candidate| can_place(candidate.rotation, candidate.anchor))
}
