//! Dynamic library loading for the native binding
//!
//! Provides cross-platform loading of the native library using `libloading`.
//! Handles platform-specific library naming conventions and search paths, and
//! exposes resolved symbols through the [`SymbolSource`] trait so callers never
//! depend on `libloading` directly.

use crate::ffi::types::{ChecksumFn, ContractVersionFn};
use libloading::{Library, Symbol};
use rgblib_config::LibraryConfig;
use std::ffi::c_void;
use std::mem;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Library loading errors
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// Library file not found in search paths
    LibraryNotFound(String),
    /// Symbol not found in library
    SymbolNotFound { library: String, symbol: String },
    /// Failed to load library
    LoadFailed(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::LibraryNotFound(name) => write!(f, "Library not found: {}", name),
            LoadError::SymbolNotFound { library, symbol } => {
                write!(f, "Symbol '{}' not found in library '{}'", symbol, library)
            }
            LoadError::LoadFailed(msg) => write!(f, "Failed to load library: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

/// Address of an exported function, type-erased
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSymbol(*const c_void);

// Safety: a code address is immutable and may be shared between threads
unsafe impl Send for RawSymbol {}
unsafe impl Sync for RawSymbol {}

impl RawSymbol {
    pub fn new(address: *const c_void) -> Self {
        Self(address)
    }

    pub fn address(&self) -> *const c_void {
        self.0
    }

    /// Reinterpret the address as a concrete function pointer type
    ///
    /// # Safety
    ///
    /// `F` must be a function pointer type whose signature matches the
    /// exported symbol exactly.
    pub unsafe fn cast<F: Copy>(self) -> F {
        debug_assert_eq!(mem::size_of::<F>(), mem::size_of::<*const c_void>());
        mem::transmute_copy::<*const c_void, F>(&self.0)
    }
}

/// Anything that can hand out the native library's exported functions
pub trait SymbolSource: Send + Sync {
    /// Name used in diagnostics
    fn library_name(&self) -> &str;

    /// Look up an exported function by its exact symbol name
    fn resolve(&self, symbol: &str) -> Result<RawSymbol, LoadError>;

    /// Contract version the library was generated against
    fn contract_version(&self, namespace: &str) -> Result<u32, LoadError> {
        let symbol = self.resolve(&format!("ffi_{namespace}_uniffi_contract_version"))?;
        // Safety: the contract version export takes no arguments and returns u32
        let version = unsafe { symbol.cast::<ContractVersionFn>()() };
        Ok(version)
    }

    /// Interface checksum the library reports for `symbol`
    fn checksum(&self, namespace: &str, symbol: &str) -> Result<u16, LoadError> {
        let export = self.resolve(&format!("uniffi_{namespace}_checksum_{symbol}"))?;
        // Safety: checksum exports take no arguments and return u16
        let checksum = unsafe { export.cast::<ChecksumFn>()() };
        Ok(checksum)
    }
}

/// A native library loaded from disk
///
/// Cloning shares the underlying library; it is unloaded when the last clone
/// is dropped.
#[derive(Clone)]
pub struct NativeLibrary {
    name: String,
    path: PathBuf,
    library: Arc<Library>,
}

impl NativeLibrary {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("name", &self.name)
            .field("path", &self.path)
            .finish()
    }
}

impl SymbolSource for NativeLibrary {
    fn library_name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, symbol: &str) -> Result<RawSymbol, LoadError> {
        // Safety: the address is only reinterpreted by callers that know the
        // exported signature; the library outlives it through the shared Arc
        unsafe {
            let export: Symbol<'_, unsafe extern "C" fn()> = self
                .library
                .get(symbol.as_bytes())
                .map_err(|_| LoadError::SymbolNotFound {
                    library: self.name.clone(),
                    symbol: symbol.to_string(),
                })?;
            Ok(RawSymbol(*export as *const c_void))
        }
    }
}

/// Dynamic library loader with platform-specific path resolution
///
/// Every successful load returns a fresh [`NativeLibrary`]; the operating
/// system keeps one mapping per file, and clones of a `NativeLibrary` share it.
///
/// # Safety
///
/// Loading dynamic libraries is inherently unsafe. The loaded code runs in the
/// same process and can perform arbitrary operations.
pub struct LibraryLoader {
    /// Platform-specific library search paths
    search_paths: Vec<PathBuf>,
}

impl LibraryLoader {
    /// Create a new library loader with default search paths
    pub fn new() -> Self {
        Self {
            search_paths: Self::default_search_paths(),
        }
    }

    /// Create a loader whose configured search paths take priority
    pub fn with_config(config: &LibraryConfig) -> Self {
        let mut loader = Self::new();
        for path in config.search_paths.iter().rev() {
            loader.add_search_path(path.clone());
        }
        loader
    }

    /// Get platform-specific default library search paths
    ///
    /// Returns standard system library paths for the current platform:
    /// - Linux: /usr/lib, /usr/local/lib, /lib
    /// - macOS: /usr/lib, /usr/local/lib, /opt/homebrew/lib
    /// - Windows: C:\Windows\System32
    /// - All platforms: current working directory
    fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        #[cfg(target_os = "linux")]
        {
            paths.push(PathBuf::from("/usr/lib"));
            paths.push(PathBuf::from("/usr/local/lib"));
            paths.push(PathBuf::from("/lib"));

            if cfg!(target_pointer_width = "64") {
                paths.push(PathBuf::from("/usr/lib64"));
                paths.push(PathBuf::from("/lib64"));
            }
        }

        #[cfg(target_os = "macos")]
        {
            paths.push(PathBuf::from("/usr/lib"));
            paths.push(PathBuf::from("/usr/local/lib"));
            paths.push(PathBuf::from("/opt/homebrew/lib"));
        }

        #[cfg(target_os = "windows")]
        {
            paths.push(PathBuf::from("C:\\Windows\\System32"));
            if let Ok(system_root) = std::env::var("SystemRoot") {
                paths.push(PathBuf::from(format!("{}\\System32", system_root)));
            }
        }

        // Current working directory (highest priority)
        if let Ok(cwd) = std::env::current_dir() {
            paths.insert(0, cwd);
        }

        paths
    }

    /// Candidate file names for a library, in priority order
    ///
    /// - Linux: lib{name}.so
    /// - macOS: lib{name}.dylib or lib{name}.so
    /// - Windows: {name}.dll
    fn candidate_file_names(name: &str) -> Vec<String> {
        let extensions: &[&str] = if cfg!(target_os = "windows") {
            &["dll"]
        } else if cfg!(target_os = "macos") {
            &["dylib", "so"]
        } else {
            &["so"]
        };

        let prefixes: &[&str] = if cfg!(target_os = "windows") {
            &["", "lib"]
        } else {
            &["lib", ""]
        };

        let mut names = Vec::new();
        for prefix in prefixes {
            for ext in extensions {
                names.push(format!("{}{}.{}", prefix, name, ext));
            }
        }
        names
    }

    /// Resolve library name to full path
    fn resolve_library_path(&self, name: &str) -> Option<PathBuf> {
        let path = Path::new(name);
        if path.is_absolute() && path.exists() {
            return Some(path.to_path_buf());
        }

        let candidates = Self::candidate_file_names(name);
        for search_path in &self.search_paths {
            for filename in &candidates {
                let full_path = search_path.join(filename);
                if full_path.exists() {
                    return Some(full_path);
                }
            }
        }

        None
    }

    /// Load a library by name or path
    pub fn load(&self, name: &str) -> Result<NativeLibrary, LoadError> {
        let path = self
            .resolve_library_path(name)
            .ok_or_else(|| LoadError::LibraryNotFound(name.to_string()))?;
        self.load_path(name, path)
    }

    /// Load the library described by `config`
    ///
    /// An explicit `path` wins over name-based discovery.
    pub fn load_configured(&self, config: &LibraryConfig) -> Result<NativeLibrary, LoadError> {
        match &config.path {
            Some(path) if path.exists() => self.load_path(&config.name, path.clone()),
            Some(path) => Err(LoadError::LibraryNotFound(path.display().to_string())),
            None => self.load(&config.name),
        }
    }

    fn load_path(&self, name: &str, path: PathBuf) -> Result<NativeLibrary, LoadError> {
        // Safety: loading runs the library's initialisers; the library is trusted
        let library =
            unsafe { Library::new(&path).map_err(|e| LoadError::LoadFailed(e.to_string()))? };
        info!(path = %path.display(), "loaded native library");

        Ok(NativeLibrary {
            name: name.to_string(),
            path,
            library: Arc::new(library),
        })
    }

    /// Add a custom search path (prepended to search list)
    pub fn add_search_path(&mut self, path: PathBuf) {
        self.search_paths.insert(0, path);
    }
}

impl Default for LibraryLoader {
    fn default() -> Self {
        Self::new()
    }
}
