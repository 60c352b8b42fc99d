//! Piece catalog - shape offset tables and colors
//!
//! Every shape owns four rotation states of four `(Δrow, Δcol)` offsets from a
//! shared anchor. Offset 0 is always `(0, 0)`: it is the anchor cell itself.
//! The kick tables in [`crate::srs`] are defined against this exact
//! convention, so these tables must not be re-centered.

use crate::types::{Coord, Rgb, Rotation, Shape};

/// Offset of a single cell relative to the piece anchor, `(Δrow, Δcol)`
pub type Offset = (i8, i8);

/// The four cells of one rotation state
pub type PieceShape = [Offset; 4];

/// North, East, South, West
pub type RotationStates = [PieceShape; 4];

// Anchor is the bottom-left block. Identical in every state.
const O_STATES: RotationStates = [
    [(0, 0), (-1, 0), (0, 1), (-1, 1)],
    [(0, 0), (-1, 0), (0, 1), (-1, 1)],
    [(0, 0), (-1, 0), (0, 1), (-1, 1)],
    [(0, 0), (-1, 0), (0, 1), (-1, 1)],
];

// Anchor is the second block from the left when flat.
const I_STATES: RotationStates = [
    [(0, 0), (0, -1), (0, 1), (0, 2)],
    [(0, 0), (-1, 0), (1, 0), (2, 0)],
    [(0, 0), (0, 1), (0, -1), (0, -2)],
    [(0, 0), (-1, 0), (1, 0), (2, 0)],
];

const J_STATES: RotationStates = [
    [(0, 0), (0, 1), (0, -1), (-1, -1)],
    [(0, 0), (-1, 0), (-1, 1), (1, 0)],
    [(0, 0), (0, 1), (0, -1), (1, 1)],
    [(0, 0), (-1, 0), (1, 0), (1, -1)],
];

const L_STATES: RotationStates = [
    [(0, 0), (0, 1), (-1, 1), (0, -1)],
    [(0, 0), (-1, 0), (1, 1), (1, 0)],
    [(0, 0), (0, 1), (0, -1), (1, -1)],
    [(0, 0), (-1, 0), (1, 0), (-1, -1)],
];

const S_STATES: RotationStates = [
    [(0, 0), (-1, 0), (-1, 1), (0, -1)],
    [(0, 0), (-1, 0), (0, 1), (1, 1)],
    [(0, 0), (0, 1), (1, 0), (1, -1)],
    [(0, 0), (0, -1), (1, 0), (-1, -1)],
];

const Z_STATES: RotationStates = [
    [(0, 0), (-1, 0), (-1, -1), (0, 1)],
    [(0, 0), (0, 1), (-1, 1), (1, 0)],
    [(0, 0), (0, -1), (1, 0), (1, 1)],
    [(0, 0), (0, -1), (-1, 0), (1, -1)],
];

const T_STATES: RotationStates = [
    [(0, 0), (-1, 0), (0, -1), (0, 1)],
    [(0, 0), (1, 0), (-1, 0), (0, 1)],
    [(0, 0), (0, 1), (0, -1), (1, 0)],
    [(0, 0), (-1, 0), (1, 0), (0, -1)],
];

/// All four rotation states of a shape
pub fn states_of(shape: Shape) -> &'static RotationStates {
    match shape {
        Shape::O => &O_STATES,
        Shape::I => &I_STATES,
        Shape::J => &J_STATES,
        Shape::L => &L_STATES,
        Shape::S => &S_STATES,
        Shape::Z => &Z_STATES,
        Shape::T => &T_STATES,
    }
}

/// Offsets for a shape in one rotation state
pub fn get_shape(shape: Shape, rotation: Rotation) -> PieceShape {
    states_of(shape)[rotation.index()]
}

/// Absolute grid cells covered by a shape placed at `anchor`.
pub fn absolute_cells(shape: Shape, rotation: Rotation, anchor: Coord) -> [Coord; 4] {
    get_shape(shape, rotation).map(|(dr, dc)| (anchor.0 + dr, anchor.1 + dc))
}

/// Display color of a shape
pub fn color_of(shape: Shape) -> Rgb {
    match shape {
        Shape::O => Rgb::new(0xff, 0xff, 0x00),
        Shape::I => Rgb::new(0x00, 0xff, 0xff),
        Shape::J => Rgb::new(0x00, 0x00, 0xff),
        Shape::L => Rgb::new(0xff, 0xaa, 0x00),
        Shape::S => Rgb::new(0x00, 0xff, 0x00),
        Shape::Z => Rgb::new(0xff, 0x00, 0x00),
        Shape::T => Rgb::new(0x99, 0x00, 0xff),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn offset_zero_is_always_the_anchor() {
        for shape in Shape::ALL {
            for state in states_of(shape) {
                assert_eq!(state[0], (0, 0), "{shape:?}");
            }
        }
    }

    #[test]
    fn every_state_has_four_distinct_cells() {
        for shape in Shape::ALL {
            for state in states_of(shape) {
                let unique: HashSet<_> = state.iter().collect();
                assert_eq!(unique.len(), 4, "{shape:?} {state:?}");
            }
        }
    }

    #[test]
    fn o_states_are_identical() {
        let states = states_of(Shape::O);
        assert!(states.iter().all(|s| *s == states[0]));
    }

    #[test]
    fn absolute_cells_translate_by_anchor() {
        let cells = absolute_cells(Shape::T, Rotation::North, (5, 4));
        assert_eq!(cells, [(5, 4), (4, 4), (5, 3), (5, 5)]);
    }

    #[test]
    fn colors_are_distinct() {
        let unique: HashSet<_> = Shape::ALL.iter().map(|s| color_of(*s)).collect();
        assert_eq!(unique.len(), 7);
    }
}
