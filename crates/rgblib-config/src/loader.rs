//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::file::{LibrarySection, LoggingSection, RgbLibConfig};
use crate::settings::{LibraryConfig, LoggingConfig};
use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const PROJECT_CONFIG_FILE: &str = "rgblib.toml";

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.rgblib/config.toml) - lowest priority
/// 2. Project config (./rgblib.toml) - overrides global
/// 3. Environment variables (RGBLIB_*) - overrides project
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone)]
pub struct Config {
    /// Merged file contents, environment overrides applied
    pub merged: RgbLibConfig,

    /// Directory where rgblib.toml was found
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Use `path` instead of ~/.rgblib/config.toml
    pub fn with_global_config_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find rgblib.toml, then merges it over
    /// the global config if one exists.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project_config) = self.find_project_config(start_dir)?;
        self.finish(project_config, project_root)
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project_config = RgbLibConfig::load_from_file(config_path)?;
        let project_root = config_path.parent().map(|p| p.to_path_buf());
        self.finish(project_config, project_root)
    }

    fn finish(
        &mut self,
        project_config: RgbLibConfig,
        project_root: Option<PathBuf>,
    ) -> ConfigResult<Config> {
        let mut merged = self.load_global_config()?;
        merged.merge(&project_config);

        let merged = self.apply_env_overrides(merged);
        merged.validate()?;

        Ok(Config {
            merged,
            project_root,
        })
    }

    /// Find project configuration by walking up directory tree
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, RgbLibConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(PROJECT_CONFIG_FILE);

            if config_path.exists() {
                let project_config = RgbLibConfig::load_from_file(&config_path)?;
                return Ok((Some(current), project_config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, RgbLibConfig::default())),
            }
        }
    }

    /// Load global configuration, if present
    fn load_global_config(&mut self) -> ConfigResult<RgbLibConfig> {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => match Self::global_config_dir() {
                Ok(dir) => {
                    let path = dir.join("config.toml");
                    self.global_config_path = Some(path.clone());
                    path
                }
                // No home directory means no global config
                Err(ConfigError::HomeNotFound) => return Ok(RgbLibConfig::default()),
                Err(e) => return Err(e),
            },
        };

        if !path.exists() {
            return Ok(RgbLibConfig::default());
        }

        RgbLibConfig::load_from_file(&path)
    }

    /// Apply environment variable overrides
    ///
    /// - `RGBLIB_LIBRARY_NAME`: library base name
    /// - `RGBLIB_LIBRARY_PATH`: explicit library file
    /// - `RGBLIB_SEARCH_PATHS`: directories in platform path-list syntax, searched first
    /// - `RGBLIB_LOG`: filter directive
    fn apply_env_overrides(&self, mut config: RgbLibConfig) -> RgbLibConfig {
        let mut env_config = RgbLibConfig::default();

        if let Ok(name) = env::var("RGBLIB_LIBRARY_NAME") {
            env_config
                .library
                .get_or_insert_with(LibrarySection::default)
                .name = Some(name);
        }

        if let Some(path) = env::var_os("RGBLIB_LIBRARY_PATH") {
            env_config
                .library
                .get_or_insert_with(LibrarySection::default)
                .path = Some(PathBuf::from(path));
        }

        if let Some(paths) = env::var_os("RGBLIB_SEARCH_PATHS") {
            env_config
                .library
                .get_or_insert_with(LibrarySection::default)
                .search_paths = env::split_paths(&paths)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }

        if let Ok(filter) = env::var("RGBLIB_LOG") {
            env_config
                .logging
                .get_or_insert_with(LoggingSection::default)
                .filter = Some(filter);
        }

        config.merge(&env_config);
        config
    }

    /// Get the global configuration directory (~/.rgblib)
    pub fn global_config_dir() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".rgblib"))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Effective library settings
    pub fn library(&self) -> LibraryConfig {
        self.merged.library()
    }

    /// Effective logging settings
    pub fn logging(&self) -> LoggingConfig {
        self.merged.logging()
    }

    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if an rgblib.toml was found
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}
