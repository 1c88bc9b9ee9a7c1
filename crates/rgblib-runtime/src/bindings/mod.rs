//! Typed bindings for the `rgb_lib` native library
//!
//! [`RgbLib`] is the entry point: it can only be obtained after the loaded
//! library passed the interface guard, so no domain call can reach a library
//! with a different interface.

pub mod checksums;
pub mod error;
pub mod objects;
pub mod types;

use crate::ffi::{
    verify_interface, CallError, FfiError, FfiRuntime, InterfaceMismatch, LibraryLoader,
    LoadError, RustBuffer, RustCallStatus, SymbolSource,
};
use rgblib_config::LibraryConfig;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

pub use checksums::{CHECKSUMS, CONTRACT_VERSION, NAMESPACE, RGB_LIB_CONTRACT};
pub use error::RgbLibError;
pub use objects::{Address, Invoice, RecipientInfo, TransportEndpoint, Wallet};
pub use types::*;

/// Result of a call that may fail with a typed [`RgbLibError`]
pub type RgbLibResult<T> = Result<T, CallError<RgbLibError>>;

/// Errors preventing the bindings from starting
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Interface(#[from] InterfaceMismatch),
}

/// Resolve `uniffi_<ns>_fn_<kind>_<name>` as a typed function pointer
///
/// # Safety
///
/// `F` must match the generated signature of the export.
pub(crate) unsafe fn export<F: Copy>(
    runtime: &FfiRuntime,
    kind: &str,
    name: &str,
) -> Result<F, FfiError> {
    runtime.function(&format!("uniffi_{}_fn_{}_{}", runtime.namespace(), kind, name))
}

/// A verified `rgb_lib` library
#[derive(Debug, Clone)]
pub struct RgbLib {
    runtime: FfiRuntime,
}

impl RgbLib {
    /// Load the library described by `config` and verify its interface
    pub fn load(config: &LibraryConfig) -> Result<Self, InitError> {
        let library = LibraryLoader::with_config(config).load_configured(config)?;
        info!(path = %library.path().display(), "verifying rgb_lib interface");
        Self::from_source(Arc::new(library))
    }

    /// Verify an already loaded library
    pub fn from_source(source: Arc<dyn SymbolSource>) -> Result<Self, InitError> {
        verify_interface(source.as_ref(), &RGB_LIB_CONTRACT)?;
        let runtime = FfiRuntime::new(NAMESPACE, source)?;
        Ok(Self { runtime })
    }

    pub fn runtime(&self) -> &FfiRuntime {
        &self.runtime
    }

    /// Generate fresh wallet keys for `network`
    pub fn generate_keys(&self, network: BitcoinNetwork) -> Result<Keys, FfiError> {
        let f: unsafe extern "C" fn(RustBuffer, *mut RustCallStatus) -> RustBuffer =
            unsafe { export(&self.runtime, "func", "generate_keys")? };
        let network = self.runtime.lower(&network)?;
        let raw = self
            .runtime
            .call(|status| unsafe { f(network.into_raw(), status) })?;
        // Safety: `raw` is the buffer the export just returned
        unsafe { self.runtime.lift(raw) }
    }

    /// Recover wallet keys from a mnemonic
    pub fn restore_keys(&self, network: BitcoinNetwork, mnemonic: &str) -> RgbLibResult<Keys> {
        let f: unsafe extern "C" fn(RustBuffer, RustBuffer, *mut RustCallStatus) -> RustBuffer =
            unsafe { export(&self.runtime, "func", "restore_keys")? };
        let network = self.runtime.lower(&network)?;
        let mnemonic = self.runtime.lower_string(mnemonic)?;
        let raw = self
            .runtime
            .call_with_error::<RgbLibError, _>(|status| unsafe {
                f(network.into_raw(), mnemonic.into_raw(), status)
            })?;
        // Safety: `raw` is the buffer the export just returned
        Ok(unsafe { self.runtime.lift(raw) }?)
    }

    /// Restore a wallet backup into `data_dir`
    pub fn restore_backup(
        &self,
        backup_path: &str,
        password: &str,
        data_dir: &str,
    ) -> RgbLibResult<()> {
        let f: unsafe extern "C" fn(RustBuffer, RustBuffer, RustBuffer, *mut RustCallStatus) =
            unsafe { export(&self.runtime, "func", "restore_backup")? };
        let backup_path = self.runtime.lower_string(backup_path)?;
        let password = self.runtime.lower_string(password)?;
        let data_dir = self.runtime.lower_string(data_dir)?;
        self.runtime.call_with_error(|status| unsafe {
            f(
                backup_path.into_raw(),
                password.into_raw(),
                data_dir.into_raw(),
                status,
            )
        })
    }
}
