//! Application constants.

/// Number of rows to move when pressing Page Up/Down.
pub const PAGE_SIZE: usize = 10;

/// Columns to pan per horizontal scroll step in the preview.
pub const H_SCROLL_STEP: usize = 4;

/// Event loop tick interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 250;
