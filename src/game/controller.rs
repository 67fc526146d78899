use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::game::board::Board;
use crate::game::piece::{ActivePiece, NextPiece, Position, ShapeKind, PALETTE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    fn delta(self) -> (i32, i32) {
        match self {
            MoveDirection::Left => (0, -1),
            MoveDirection::Right => (0, 1),
            MoveDirection::Down => (1, 0),
        }
    }
}

/// What a move did to the piece and board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Sideways move into a wall or stack, or no piece in play.
    Blocked,
    /// A downward move failed: the piece was locked, `cleared` rows were
    /// removed, and the following spawn succeeded when `spawned` is true.
    Locked { cleared: usize, spawned: bool },
}

/// Owns the falling piece and the lookahead queue.
pub struct PieceController {
    current: Option<ActivePiece>,
    next: Option<NextPiece>,
    rng: StdRng,
}

impl PieceController {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic piece sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            current: None,
            next: None,
            rng,
        }
    }

    pub fn current(&self) -> Option<&ActivePiece> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&NextPiece> {
        self.next.as_ref()
    }

    /// Overrides the lookahead so the next spawn uses `next`.
    pub fn queue_next(&mut self, next: NextPiece) {
        self.next = Some(next);
    }

    /// Drops both pieces; the following spawn draws current and next fresh.
    pub fn clear(&mut self) {
        self.current = None;
        self.next = None;
    }

    fn random_piece(&mut self) -> NextPiece {
        // Shape and color are drawn independently and uniformly
        let kind = *ShapeKind::ALL.choose(&mut self.rng).unwrap_or(&ShapeKind::O);
        let color = *PALETTE.choose(&mut self.rng).unwrap_or(&PALETTE[0]);
        NextPiece::new(kind, color)
    }

    /// Promotes the queued piece to the board's top center and rolls a new
    /// lookahead. Returns false when the spawn position is already blocked.
    ///
    /// The lookahead is rolled even when the spawn fails.
    pub fn spawn(&mut self, board: &Board) -> bool {
        let promoted = match self.next.take() {
            Some(next) => next,
            None => self.random_piece(),
        };
        self.next = Some(self.random_piece());

        let col = (board.columns() / 2).saturating_sub(promoted.shape.width() / 2);
        let piece = ActivePiece {
            shape: promoted.shape,
            color: promoted.color,
            position: Position::new(0, col as i32),
        };

        let valid = board.is_valid(&piece.shape, piece.position);
        debug!(position = ?piece.position, valid, "spawned piece");
        self.current = Some(piece);
        valid
    }

    /// Replaces the current shape with its clockwise rotation.
    ///
    /// No validity check is made: the rotated piece may overlap the stack or
    /// stick out of the grid.
    pub fn rotate(&mut self) {
        if let Some(piece) = self.current.as_mut() {
            piece.shape = piece.shape.rotated_clockwise();
        }
    }

    /// Moves the piece one cell. A blocked downward move locks the piece,
    /// clears full rows and spawns the next piece.
    pub fn move_piece(&mut self, direction: MoveDirection, board: &mut Board) -> MoveOutcome {
        let Some(piece) = self.current.as_mut() else {
            return MoveOutcome::Blocked;
        };

        let (d_row, d_col) = direction.delta();
        let candidate = piece.position.offset(d_row, d_col);

        if board.is_valid(&piece.shape, candidate) {
            piece.position = candidate;
            return MoveOutcome::Moved;
        }

        if direction != MoveDirection::Down {
            return MoveOutcome::Blocked;
        }

        board.lock(&piece.shape, piece.position, piece.color);
        debug!(position = ?piece.position, "locked piece");
        let cleared = board.clear_full_rows();
        let spawned = self.spawn(board);

        MoveOutcome::Locked { cleared, spawned }
    }
}

impl Default for PieceController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Cell;
    use ratatui::style::Color;

    fn o_piece() -> NextPiece {
        NextPiece::new(ShapeKind::O, Color::Yellow)
    }

    #[test]
    fn first_spawn_draws_current_and_next() {
        let board = Board::new(20, 10);
        let mut controller = PieceController::seeded(7);
        assert!(controller.current().is_none());
        assert!(controller.spawn(&board));
        assert!(controller.current().is_some());
        assert!(controller.next().is_some());
    }

    #[test]
    fn spawn_promotes_queued_piece_centered() {
        let board = Board::new(20, 10);
        let mut controller = PieceController::seeded(7);
        controller.queue_next(NextPiece::new(ShapeKind::I, Color::Cyan));
        assert!(controller.spawn(&board));

        let piece = controller.current().unwrap();
        assert_eq!(piece.shape, ShapeKind::I.shape());
        assert_eq!(piece.color, Color::Cyan);
        // 10 / 2 - 4 / 2
        assert_eq!(piece.position, Position::new(0, 3));
    }

    #[test]
    fn seeded_controllers_agree() {
        let board = Board::new(20, 10);
        let mut a = PieceController::seeded(42);
        let mut b = PieceController::seeded(42);
        for _ in 0..10 {
            a.spawn(&board);
            b.spawn(&board);
            assert_eq!(a.current(), b.current());
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn sideways_into_wall_is_ignored() {
        let mut board = Board::new(20, 10);
        let mut controller = PieceController::seeded(1);
        controller.queue_next(o_piece());
        controller.spawn(&board);

        for _ in 0..4 {
            assert_eq!(controller.move_piece(MoveDirection::Left, &mut board), MoveOutcome::Moved);
        }
        assert_eq!(controller.move_piece(MoveDirection::Left, &mut board), MoveOutcome::Blocked);
        assert_eq!(controller.current().unwrap().position, Position::new(0, 0));
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn blocked_down_locks_and_spawns() {
        let mut board = Board::new(20, 10);
        let mut controller = PieceController::seeded(1);
        controller.queue_next(o_piece());
        controller.spawn(&board);

        for _ in 0..18 {
            assert_eq!(controller.move_piece(MoveDirection::Down, &mut board), MoveOutcome::Moved);
        }
        let outcome = controller.move_piece(MoveDirection::Down, &mut board);
        assert_eq!(outcome, MoveOutcome::Locked { cleared: 0, spawned: true });
        assert_eq!(board.get(19, 5), Some(Cell::Filled(Color::Yellow)));
        assert_eq!(controller.current().unwrap().position.row, 0);
    }

    #[test]
    fn rotate_skips_validity_check() {
        let board = Board::new(20, 10);
        let mut controller = PieceController::seeded(1);
        controller.queue_next(NextPiece::new(ShapeKind::I, Color::Cyan));
        controller.spawn(&board);
        controller.rotate();

        let piece = controller.current().unwrap();
        assert_eq!((piece.shape.height(), piece.shape.width()), (4, 1));
        assert_eq!(piece.position, Position::new(0, 3));
    }

    #[test]
    fn move_without_piece_is_blocked() {
        let mut board = Board::new(20, 10);
        let mut controller = PieceController::seeded(1);
        assert_eq!(controller.move_piece(MoveDirection::Down, &mut board), MoveOutcome::Blocked);
        assert_eq!(board.filled_count(), 0);
    }
}
