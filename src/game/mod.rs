pub mod piece;
pub mod board;
pub mod controller;
pub mod state;

pub use board::{Board, Cell};
pub use controller::{MoveDirection, MoveOutcome, PieceController};
pub use piece::{ActivePiece, NextPiece, Position, Shape, ShapeKind, PALETTE};
pub use state::{GameSession, GameState};
