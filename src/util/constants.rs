// LogMerge - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogMerge";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogMerge";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file name, looked up inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Sorting
// =============================================================================

/// Below this many elements the parallel sorter stops forking and recurses
/// sequentially. Forking tiny slices costs more than it saves.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4_096;

/// Smallest accepted `[sort] parallel_threshold`.
pub const MIN_PARALLEL_THRESHOLD: usize = 2;

/// Largest accepted `[sort] parallel_threshold`.
pub const MAX_PARALLEL_THRESHOLD: usize = 1_000_000;

/// Worker threads for the rayon pool. 0 means rayon's default (one per core).
pub const DEFAULT_WORKER_THREADS: usize = 0;

/// Hard upper bound on `[sort] worker_threads`.
pub const MAX_WORKER_THREADS: usize = 256;

// =============================================================================
// Input limits
// =============================================================================

/// Maximum number of sources accepted in one interactive session.
pub const MAX_SOURCES: usize = 10_000;

/// Maximum declared entry count for a single source.
pub const MAX_ENTRIES_PER_SOURCE: usize = 10_000_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config set one.
/// Kept at "warn" so that diagnostics do not drown the interactive prompts.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
