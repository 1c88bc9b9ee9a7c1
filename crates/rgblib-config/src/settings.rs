//! Resolved settings handed to the runtime

use std::path::PathBuf;

/// Base name of the native library, without platform prefix or extension
pub const DEFAULT_LIBRARY_NAME: &str = "rgblibuniffi";

/// Filter directive used when neither the config nor the environment sets one
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Where to find the native library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Library base name, e.g. `rgblibuniffi` for `librgblibuniffi.so`
    pub name: String,

    /// Explicit library file; skips the search entirely
    pub path: Option<PathBuf>,

    /// Directories searched before the platform defaults
    pub search_paths: Vec<PathBuf>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_LIBRARY_NAME.to_string(),
            path: None,
            search_paths: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub filter: String,

    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            ansi: false,
        }
    }
}
