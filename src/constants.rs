pub const BOARD_COLUMNS: usize = 10;
pub const BOARD_ROWS: usize = 20;

// The longest shape spans 4 cells in either orientation
pub const MIN_BOARD_COLUMNS: usize = 4;
pub const MIN_BOARD_ROWS: usize = 4;

// Timing (gravity in milliseconds, loop cap in frames per second)
pub const FALL_INTERVAL_MS: u64 = 500;
pub const FRAME_RATE: u32 = 30;

pub const LINE_CLEAR_POINTS: u32 = 100;

// Side length of the next-piece preview area
pub const PREVIEW_SIZE: usize = 4;

pub const DEFAULT_LOG_FILE: &str = "blockfall.log";
