//! rgb_lib Configuration System
//!
//! Provides configuration for hosts of the rgb_lib runtime:
//! - Project configuration (rgblib.toml)
//! - Global user configuration (~/.rgblib/config.toml)
//! - Environment overrides (RGBLIB_*)
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Global config (~/.rgblib/config.toml)
//! 2. Project config (./rgblib.toml, searched upwards)
//! 3. Environment variables (RGBLIB_*)
//!
//! # Example
//!
//! ```no_run
//! use rgblib_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! println!("loading {}", config.library().name);
//! ```

pub mod file;
pub mod loader;
pub mod settings;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

// Re-export main types
pub use file::{LibrarySection, LoggingSection, RgbLibConfig};
pub use loader::{Config, ConfigLoader};
pub use settings::{LibraryConfig, LoggingConfig, DEFAULT_LIBRARY_NAME, DEFAULT_LOG_FILTER};
