//! Timing and sizing constants shared by the binary and the logic modules.

/// Tick interval in milliseconds (feedback countdown granularity).
pub const TICK_INTERVAL_MS: u64 = 100;

/// Input poll timeout in milliseconds.
pub const INPUT_POLL_MS: u64 = 50;

/// How many ticks move feedback stays on the status bar (10 = 1 second).
pub const FEEDBACK_TICKS: u32 = 10;

/// Maximum retained session log entries.
pub const SESSION_LOG_CAPACITY: usize = 50;

/// Exercise directory used when none is given on the command line.
pub const DEFAULT_EXERCISE_DIR: &str = "exercises";
