use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use derive_more::{Display, Error};

use crate::constants::{
    BOARD_COLUMNS, BOARD_ROWS, DEFAULT_LOG_FILE, FALL_INTERVAL_MS, FRAME_RATE, MIN_BOARD_COLUMNS,
    MIN_BOARD_ROWS,
};

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blockfall",
    version,
    about = "Falling-block puzzle in the terminal. Fill rows to clear them and score.",
    long_about = "Steer the falling pieces into full rows. Each cleared row scores 100 points; \
        the game ends when a new piece has no room to spawn.\n\n\
        CONTROLS:\n  Left/Right (h/l)  Move    Up (k)  Rotate    Down (j)  Soft drop\n  \
        R                 Restart Q / Esc  Quit"
)]
pub struct Args {
    /// Number of board rows.
    #[arg(long, default_value_t = BOARD_ROWS)]
    pub rows: usize,

    /// Number of board columns.
    #[arg(long, default_value_t = BOARD_COLUMNS)]
    pub columns: usize,

    /// Milliseconds between automatic falls.
    #[arg(long, default_value_t = FALL_INTERVAL_MS)]
    pub fall_interval_ms: u64,

    /// Loop rate cap in frames per second.
    #[arg(long, default_value_t = FRAME_RATE)]
    pub frame_rate: u32,

    /// Seed for a reproducible piece sequence.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where log output is written.
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    #[display(
        "board must be at least {}x{}, got {}x{}",
        MIN_BOARD_ROWS, MIN_BOARD_COLUMNS, rows, columns
    )]
    BoardTooSmall { rows: usize, columns: usize },

    #[display("fall interval must be greater than zero")]
    ZeroFallInterval,

    #[display("frame rate must be greater than zero")]
    ZeroFrameRate,
}

/// Validated settings for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub fall_interval: Duration,
    pub frame_rate: u32,
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Time one loop iteration is allowed to take.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS,
            columns: BOARD_COLUMNS,
            fall_interval: Duration::from_millis(FALL_INTERVAL_MS),
            frame_rate: FRAME_RATE,
            seed: None,
        }
    }
}

impl Args {
    pub fn into_config(self) -> Result<GameConfig, ConfigError> {
        if self.rows < MIN_BOARD_ROWS || self.columns < MIN_BOARD_COLUMNS {
            return Err(ConfigError::BoardTooSmall {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if self.fall_interval_ms == 0 {
            return Err(ConfigError::ZeroFallInterval);
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }

        Ok(GameConfig {
            rows: self.rows,
            columns: self.columns,
            fall_interval: Duration::from_millis(self.fall_interval_ms),
            frame_rate: self.frame_rate,
            seed: self.seed,
        })
    }
}
