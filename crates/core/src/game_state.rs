//! Game state module - the session that owns board, falling piece and bags
//!
//! Every command runs to completion synchronously. Movement, rotation and
//! drops consult the collision predicate before touching the piece; a blocked
//! command leaves everything as it was and reports `false`.
//!
//! Gravity never locks a piece. Only a hard drop locks, clears rows and
//! spawns the next piece, and ticks are refused while it runs.

use crate::board::{Board, BoundsError};
use crate::collision::can_place;
use crate::config::{ConfigError, EngineConfig};
use crate::pieces::absolute_cells;
use crate::rng::BagRandomizer;
use crate::snapshot::{ActiveSnapshot, CellSnapshot, GameSnapshot};
use crate::srs::try_rotate;
use crate::types::{Coord, GameAction, LockEvent, Rotation, Shape, Turn};

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: Shape,
    pub rotation: Rotation,
    /// Grid position of offset `(0, 0)`
    pub anchor: Coord,
}

impl Piece {
    /// A piece in its spawn orientation
    pub fn new(shape: Shape, anchor: Coord) -> Self {
        Self {
            shape,
            rotation: Rotation::North,
            anchor,
        }
    }

    pub fn cells(&self) -> [Coord; 4] {
        absolute_cells(self.shape, self.rotation, self.anchor)
    }

    pub fn shifted(self, d_row: i8, d_col: i8) -> Self {
        Self {
            anchor: (self.anchor.0 + d_row, self.anchor.1 + d_col),
            ..self
        }
    }
}

/// Session orchestrator
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    active: Option<Piece>,
    bag: BagRandomizer,
    /// Held false for the whole of a hard drop.
    ticks_enabled: bool,
    game_over: bool,
    /// Increments on every spawn.
    piece_id: u32,
    lines: u32,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Standard board and palette with the given bag seed
    pub fn new(seed: u32) -> Self {
        Self::from_parts(EngineConfig::with_seed(seed), BagRandomizer::new(seed))
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let bag = BagRandomizer::new(config.seed);
        Ok(Self::from_parts(config, bag))
    }

    fn from_parts(config: EngineConfig, bag: BagRandomizer) -> Self {
        let board = Board::with_dimensions(
            config.width,
            config.height,
            config.margin_rows,
            config.palette.empty,
        );
        let mut state = Self {
            config,
            board,
            active: None,
            bag,
            ticks_enabled: true,
            game_over: false,
            piece_id: 0,
            lines: 0,
            last_event: None,
        };
        state.spawn_next();
        state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct grid access for puzzle setups.
    ///
    /// Cells written here should be locked blocks; the falling piece's
    /// projection is rebuilt by the next command.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    /// Absolute cells of the falling piece
    pub fn active_cells(&self) -> Option<[Coord; 4]> {
        self.active.map(|p| p.cells())
    }

    pub fn bag(&self) -> &BagRandomizer {
        &self.bag
    }

    /// Upcoming shapes: the rest of the current bag, then the next bag
    pub fn preview(&self) -> impl Iterator<Item = Shape> + '_ {
        self.bag.preview()
    }

    pub fn ticks_enabled(&self) -> bool {
        self.ticks_enabled
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    /// Total rows cleared this session
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Collision test for a candidate placement of the active piece.
    fn fits(&self, piece: &Piece, own: &[Coord]) -> bool {
        can_place(&self.board, piece.shape, piece.rotation, piece.anchor, own)
    }

    /// Rewrite the falling piece's projection on the board.
    fn refresh_projection(&mut self) {
        self.board.clear_current();
        if let Some(piece) = self.active {
            let color = self.config.palette.color_of(piece.shape);
            expect_in_bounds(self.board.project_current(&piece.cells(), color));
        }
    }

    /// Draw the next shape and put it at the spawn anchor
    ///
    /// Returns false (and ends the session) when the spawn placement is blocked.
    fn spawn_next(&mut self) -> bool {
        let shape = self.bag.draw();
        self.spawn_piece(Piece::new(shape, self.config.spawn_anchor))
    }

    fn spawn_piece(&mut self, piece: Piece) -> bool {
        if !self.fits(&piece, &[]) {
            self.active = None;
            self.game_over = true;
            self.refresh_projection();
            return false;
        }
        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        self.refresh_projection();
        true
    }

    /// Replace the falling piece with a fresh `shape` at the spawn anchor.
    ///
    /// The bag is not consulted. Returns false if the spawn placement is
    /// blocked, in which case nothing changes.
    pub fn spawn_shape(&mut self, shape: Shape) -> bool {
        self.set_active(Piece::new(shape, self.config.spawn_anchor))
    }

    /// Put an arbitrary piece in play if it fits on the locked cells.
    pub fn set_active(&mut self, piece: Piece) -> bool {
        if self.game_over || !self.fits(&piece, &[]) {
            return false;
        }
        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        self.refresh_projection();
        true
    }

    /// Translate the active piece if the target placement is free
    pub fn try_move(&mut self, d_row: i8, d_col: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(d_row, d_col);
        if !self.fits(&moved, &active.cells()) {
            return false;
        }

        self.active = Some(moved);
        self.refresh_projection();
        true
    }

    /// Rotate the active piece, trying kicks in table order
    pub fn try_rotate(&mut self, turn: Turn) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let own = active.cells();
        let result = try_rotate(
            active.shape,
            active.rotation,
            active.anchor,
            turn,
            |rotation, anchor| can_place(&self.board, active.shape, rotation, anchor, &own),
        );

        let Some(result) = result else {
            return false;
        };

        self.active = Some(Piece {
            rotation: result.rotation,
            anchor: result.anchor,
            ..active
        });
        self.refresh_projection();
        true
    }

    /// Gravity: one row down. Refused while ticks are disabled; never locks.
    pub fn tick(&mut self) -> bool {
        if !self.ticks_enabled || self.game_over {
            return false;
        }
        self.try_move(1, 0)
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(0, -1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(0, 1)
    }

    pub fn soft_drop(&mut self) -> bool {
        self.try_move(1, 0)
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.try_rotate(Turn::Cw)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(Turn::Ccw)
    }

    pub fn rotate_180(&mut self) -> bool {
        self.try_rotate(Turn::Half)
    }

    /// Where the active piece would come to rest
    ///
    /// Steps down one row at a time, so at most `height` placements are tested.
    pub fn landing(&self) -> Option<Piece> {
        let active = self.active?;
        let own = active.cells();

        let mut settled = active;
        loop {
            let next = settled.shifted(1, 0);
            if !self.fits(&next, &own) {
                break;
            }
            settled = next;
        }
        Some(settled)
    }

    /// Drop to rest, lock, clear full rows and spawn the next piece
    ///
    /// Returns the number of rows cleared.
    pub fn hard_drop(&mut self) -> u32 {
        let Some(settled) = self.landing() else {
            return 0;
        };

        self.ticks_enabled = false;
        self.active = Some(settled);
        let lines = self.lock_piece(settled);
        self.ticks_enabled = true;
        lines
    }

    fn lock_piece(&mut self, piece: Piece) -> u32 {
        self.board.clear_current();
        self.active = None;

        let color = self.config.palette.color_of(piece.shape);
        expect_in_bounds(self.board.lock_cells(&piece.cells(), color));

        let lines_cleared = self.board.scan_and_clear_full_rows() as u32;
        self.lines += lines_cleared;

        let spawned = self.spawn_next();
        self.last_event = Some(LockEvent {
            shape: piece.shape,
            rotation: piece.rotation,
            anchor: piece.anchor,
            lines_cleared,
            total_lines: self.lines,
            top_out: !spawned,
        });

        lines_cleared
    }

    /// Fresh board and piece from the same config; the bag continues its RNG stream.
    pub fn restart(&mut self) {
        let bag = BagRandomizer::new(self.bag.seed());
        *self = Self::from_parts(self.config.clone(), bag);
    }

    /// Apply a player command. Returns whether the state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                let had_piece = self.active.is_some();
                self.hard_drop();
                had_piece
            }
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::Rotate180 => self.rotate_180(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.margin_rows = self.board.margin_rows();

        out.cells.clear();
        out.cells.extend(self.board.cells().iter().map(|cell| CellSnapshot {
            occupied: cell.occupied,
            color: cell.color,
        }));

        out.active = self.active.map(ActiveSnapshot::from);
        out.landing = self.landing().map(|p| p.cells());

        out.preview.clear();
        out.preview.extend(self.bag.preview());

        out.ticks_enabled = self.ticks_enabled;
        out.game_over = self.game_over;
        out.piece_id = self.piece_id;
        out.lines = self.lines;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Writes of validated placements cannot leave the grid.
fn expect_in_bounds(result: Result<(), BoundsError>) {
    if let Err(err) = result {
        unreachable!("validated placement left the grid: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgb;

    const GRAY: Rgb = Rgb::new(90, 90, 90);

    fn state_with(shape: Shape) -> GameState {
        let mut state = GameState::new(12345);
        assert!(state.spawn_shape(shape));
        state
    }

    #[test]
    fn test_new_game_state_spawns_first_piece() {
        let state = GameState::new(12345);
        let active = state.active.unwrap();

        assert_eq!(active.anchor, (2, 4));
        assert_eq!(active.rotation, Rotation::North);
        assert!(state.ticks_enabled);
        assert!(!state.game_over);
        assert_eq!(state.piece_id, 1);
        assert_eq!(state.lines, 0);
        // One shape dealt from the first bag.
        assert_eq!(state.bag.current_bag().len(), 6);
    }

    #[test]
    fn test_first_piece_is_front_of_first_bag() {
        let bags = BagRandomizer::new(77);
        let expected = bags.peek();
        let state = GameState::new(77);
        assert_eq!(state.active.unwrap().shape, expected);
    }

    #[test]
    fn test_active_piece_is_projected() {
        let state = state_with(Shape::T);
        for (row, col) in state.active_cells().unwrap() {
            let cell = state.board.get(row, col).unwrap();
            assert!(cell.occupied && cell.current && !cell.placed);
        }
    }

    #[test]
    fn test_try_move() {
        let mut state = state_with(Shape::T);
        assert!(state.try_move(0, 1));
        assert_eq!(state.active.unwrap().anchor, (2, 5));
        assert!(state.try_move(1, 0));
        assert_eq!(state.active.unwrap().anchor, (3, 5));
        assert!(!state.board.get(2, 4).unwrap().occupied);
    }

    #[test]
    fn test_set_active_rejects_anchor_far_off_grid() {
        let mut state = state_with(Shape::T);
        let before = state.active;

        let far = Piece {
            shape: Shape::T,
            rotation: Rotation::East,
            anchor: (127, 0),
        };
        assert!(!state.set_active(far));
        let wide = Piece {
            shape: Shape::I,
            rotation: Rotation::North,
            anchor: (20, 126),
        };
        assert!(!state.set_active(wide));
        assert_eq!(state.active, before);
    }

    #[test]
    fn test_try_move_collision() {
        let mut state = state_with(Shape::O);
        // O at (2,4) covers rows 1-2, cols 4-5.
        state.board.place(3, 5, GRAY).unwrap();
        assert!(!state.soft_drop());
        assert_eq!(state.active.unwrap().anchor, (2, 4));
    }

    #[test]
    fn test_tick_refused_while_ticks_disabled() {
        let mut state = state_with(Shape::O);
        state.ticks_enabled = false;
        assert!(!state.tick());
        assert_eq!(state.active.unwrap().anchor, (2, 4));

        state.ticks_enabled = true;
        assert!(state.tick());
        assert_eq!(state.active.unwrap().anchor, (3, 4));
    }

    #[test]
    fn test_tick_never_locks() {
        let mut state = state_with(Shape::O);
        for _ in 0..40 {
            state.tick();
        }
        let active = state.active.unwrap();
        assert_eq!(active.anchor, (22, 4));
        assert_eq!(state.piece_id, 2);
        assert!(state.board.cells().iter().all(|c| !c.placed));
        assert!(state.last_event.is_none());
    }

    #[test]
    fn test_rotate_o_is_accepted_in_place() {
        let mut state = state_with(Shape::O);
        let before = state.active_cells().unwrap();
        assert!(state.rotate_cw());
        assert!(state.rotate_180());
        let after = state.active.unwrap();
        assert_eq!(after.rotation, Rotation::West);
        assert_eq!(after.anchor, (2, 4));
        assert_eq!(state.active_cells().unwrap(), before);
    }

    #[test]
    fn test_rotate_180_rejected_for_other_shapes() {
        let mut state = state_with(Shape::T);
        assert!(!state.rotate_180());
        assert_eq!(state.active.unwrap().rotation, Rotation::North);
    }

    #[test]
    fn test_hard_drop_restores_ticks_and_spawns() {
        let mut state = state_with(Shape::I);
        let next = state.bag.peek();
        assert_eq!(state.hard_drop(), 0);

        assert!(state.ticks_enabled);
        assert_eq!(state.active.unwrap().shape, next);
        assert_eq!(state.active.unwrap().anchor, (2, 4));
        for col in 3..=6 {
            assert!(state.board.is_placed(22, col));
        }
    }

    #[test]
    fn test_last_event_set_on_hard_drop() {
        let mut state = state_with(Shape::O);
        assert!(state.take_last_event().is_none());
        state.hard_drop();

        let event = state.take_last_event().unwrap();
        assert_eq!(event.shape, Shape::O);
        assert_eq!(event.anchor, (22, 4));
        assert_eq!(event.lines_cleared, 0);
        assert!(!event.top_out);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_top_out_when_spawn_blocked() {
        let mut state = state_with(Shape::O);
        // Block every spawn footprint.
        for col in 0..10 {
            state.board.place(1, col, GRAY).unwrap();
            state.board.place(2, col, GRAY).unwrap();
        }
        // Move the O below the wall of blocks first.
        state.active = Some(Piece::new(Shape::O, (10, 4)));
        state.hard_drop();

        assert!(state.game_over);
        assert!(state.active.is_none());
        assert!(state.take_last_event().unwrap().top_out);
        assert!(!state.tick());
        assert!(!state.move_left());
        assert_eq!(state.hard_drop(), 0);
    }

    #[test]
    fn test_restart_resets_board_and_continues_bag() {
        let mut state = state_with(Shape::O);
        state.hard_drop();
        let seed = state.bag.seed();

        assert!(state.apply_action(GameAction::Restart));
        assert!(state.board.cells().iter().all(|c| !c.placed));
        assert_eq!(state.lines, 0);
        assert_eq!(state.piece_id, 1);
        assert_eq!(state.active.unwrap().shape, BagRandomizer::new(seed).peek());
    }

    #[test]
    fn test_snapshot_reports_projection_and_landing() {
        let state = state_with(Shape::O);
        let snap = state.snapshot();

        assert_eq!(snap.cells.len(), 230);
        assert_eq!(snap.margin_rows, 3);
        let active = snap.active.unwrap();
        assert_eq!(active.shape, Shape::O);
        for (row, col) in active.cells {
            assert!(snap.cell(row, col).unwrap().occupied);
        }
        assert_eq!(snap.landing, Some([(22, 4), (21, 4), (22, 5), (21, 5)]));
        assert_eq!(snap.preview.len(), 13);
    }
}
