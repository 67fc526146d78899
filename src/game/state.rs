use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::constants::LINE_CLEAR_POINTS;
use crate::game::board::Board;
use crate::game::controller::{MoveDirection, MoveOutcome, PieceController};
use crate::input::Command;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Playing,
    GameOver,
}

/// Everything one game needs: the board, the pieces, score and timing.
pub struct GameSession {
    pub board: Board,
    pub controller: PieceController,
    score: u32,
    lines_cleared: u32,
    state: GameState,
    fall_interval: Duration,
    last_fall: Instant,
}

impl GameSession {
    /// Builds a session and performs the initial spawn.
    pub fn new(config: &GameConfig, now: Instant) -> Self {
        let controller = match config.seed {
            Some(seed) => PieceController::seeded(seed),
            None => PieceController::new(),
        };

        let mut session = Self {
            board: Board::new(config.rows, config.columns),
            controller,
            score: 0,
            lines_cleared: 0,
            state: GameState::Playing,
            fall_interval: config.fall_interval,
            last_fall: now,
        };
        session.spawn();
        session
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn fall_interval(&self) -> Duration {
        self.fall_interval
    }

    /// Spawns the queued piece. A blocked spawn ends the game.
    pub fn spawn(&mut self) -> bool {
        let spawned = self.controller.spawn(&self.board);
        if !spawned {
            self.end_game();
        }
        spawned
    }

    /// Applies one command. Movement and rotation are ignored once the game
    /// is over; reset is always accepted. Quit is left to the caller.
    pub fn handle(&mut self, command: Command, now: Instant) {
        match command {
            Command::Reset => self.reset(now),
            Command::Quit => {}
            _ if self.is_game_over() => {
                trace!(?command, "ignored after game over");
            }
            Command::MoveLeft => self.move_piece(MoveDirection::Left),
            Command::MoveRight => self.move_piece(MoveDirection::Right),
            Command::SoftDrop => self.move_piece(MoveDirection::Down),
            Command::Rotate => self.rotate(),
        }
    }

    pub fn move_piece(&mut self, direction: MoveDirection) {
        if self.is_game_over() {
            return;
        }

        if let MoveOutcome::Locked { cleared, spawned } =
            self.controller.move_piece(direction, &mut self.board)
        {
            self.add_cleared(cleared);
            if !spawned {
                self.end_game();
            }
        }
    }

    pub fn rotate(&mut self) {
        if !self.is_game_over() {
            self.controller.rotate();
        }
    }

    /// Gravity: once `fall_interval` has elapsed since the last automatic
    /// fall, moves the piece down one row. Returns true if it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.is_game_over() {
            return false;
        }

        if now.saturating_duration_since(self.last_fall) < self.fall_interval {
            return false;
        }

        trace!("gravity tick");
        self.move_piece(MoveDirection::Down);
        self.last_fall = now;
        true
    }

    /// Empties the board, zeroes the score and starts over with fresh pieces.
    pub fn reset(&mut self, now: Instant) {
        self.board.reset();
        self.controller.clear();
        self.score = 0;
        self.lines_cleared = 0;
        self.state = GameState::Playing;
        self.last_fall = now;
        info!("game reset");
        self.spawn();
    }

    fn add_cleared(&mut self, cleared: usize) {
        if cleared == 0 {
            return;
        }
        let cleared = cleared as u32;
        self.lines_cleared += cleared;
        self.score += cleared * LINE_CLEAR_POINTS;
        debug!(cleared, score = self.score, "rows cleared");
    }

    fn end_game(&mut self) {
        self.state = GameState::GameOver;
        info!(score = self.score, lines = self.lines_cleared, "game over");
    }
}
