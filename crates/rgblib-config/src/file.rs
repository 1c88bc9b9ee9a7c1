//! Configuration file (rgblib.toml, ~/.rgblib/config.toml)
//!
//! Both the project file and the global file share this schema. Every field
//! is optional; missing values fall back to [`LibraryConfig::default`] and
//! [`LoggingConfig::default`].

use crate::settings::{LibraryConfig, LoggingConfig};
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Contents of one configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RgbLibConfig {
    /// Native library location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<LibrarySection>,

    /// Log output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingSection>,
}

/// `[library]` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LibrarySection {
    /// Library base name (default: "rgblibuniffi")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Explicit path to the library file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Extra directories to search, in order
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search_paths: Vec<PathBuf>,
}

/// `[logging]` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Filter directive (default: "warn")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Colored output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ansi: Option<bool>,
}

impl RgbLibConfig {
    /// Load configuration from a file
    ///
    /// Relative paths in `[library]` are resolved against the file's directory.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let mut config: Self =
            toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
                file: path.to_path_buf(),
                error: e,
            })?;

        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        config.validate()?;
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        if let Some(library) = self.library.as_mut() {
            if let Some(path) = library.path.as_mut() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
            for dir in library.search_paths.iter_mut() {
                if dir.is_relative() {
                    *dir = base.join(&*dir);
                }
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(library) = &self.library {
            if let Some(name) = &library.name {
                if name.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: "library.name".to_string(),
                        reason: "name cannot be empty".to_string(),
                    });
                }
            }
            if let Some(path) = &library.path {
                if path.file_name().is_none() {
                    return Err(ConfigError::InvalidValue {
                        field: "library.path".to_string(),
                        reason: format!("'{}' does not name a file", path.display()),
                    });
                }
            }
        }

        if let Some(logging) = &self.logging {
            if let Some(filter) = &logging.filter {
                if filter.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: "logging.filter".to_string(),
                        reason: "filter cannot be empty".to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Merge another config into this one
    ///
    /// Values set in `other` win. Search paths accumulate, with `other`'s
    /// directories searched first.
    pub fn merge(&mut self, other: &RgbLibConfig) {
        if let Some(theirs) = &other.library {
            let ours = self.library.get_or_insert_with(Default::default);
            if theirs.name.is_some() {
                ours.name = theirs.name.clone();
            }
            if theirs.path.is_some() {
                ours.path = theirs.path.clone();
            }
            if !theirs.search_paths.is_empty() {
                let mut search_paths = theirs.search_paths.clone();
                search_paths.append(&mut ours.search_paths);
                ours.search_paths = search_paths;
            }
        }

        if let Some(theirs) = &other.logging {
            let ours = self.logging.get_or_insert_with(Default::default);
            if theirs.filter.is_some() {
                ours.filter = theirs.filter.clone();
            }
            if theirs.ansi.is_some() {
                ours.ansi = theirs.ansi;
            }
        }
    }

    /// Effective library settings
    pub fn library(&self) -> LibraryConfig {
        let mut resolved = LibraryConfig::default();
        if let Some(library) = &self.library {
            if let Some(name) = &library.name {
                resolved.name = name.clone();
            }
            resolved.path = library.path.clone();
            resolved.search_paths = library.search_paths.clone();
        }
        resolved
    }

    /// Effective logging settings
    pub fn logging(&self) -> LoggingConfig {
        let mut resolved = LoggingConfig::default();
        if let Some(logging) = &self.logging {
            if let Some(filter) = &logging.filter {
                resolved.filter = filter.clone();
            }
            if let Some(ansi) = logging.ansi {
                resolved.ansi = ansi;
            }
        }
        resolved
    }
}
