// Constants for the visualizer

/// Memory ceiling for recorded snapshots (64 MiB)
pub const SNAPSHOT_MEMORY_LIMIT: usize = 64 * 1024 * 1024;

/// Delay between steps in auto-play mode, in milliseconds
pub const PLAY_INTERVAL_MS: u64 = 600;

/// Minimum delay between space presses before play/pause toggles again
pub const SPACE_DEBOUNCE_MS: u64 = 200;
