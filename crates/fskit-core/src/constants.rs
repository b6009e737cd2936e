//! Constants and default values for fskit

/// Default log file max size in bytes (1MB)
pub const DEFAULT_MAX_SIZE: u64 = 1024 * 1024;

/// Default number of rotated generations, 0 means no rotation
pub const DEFAULT_ROTATION: u32 = 0;

/// Leading character that turns a search needle into a regular expression
pub const REGEX_MARKER: char = '/';

/// Default config file names to search for (in priority order)
pub const CONFIG_FILES: &[&str] = &["fskit.toml", "fskit.yaml", "fskit.yml", "fskit.json"];
