//! Calling native functions and classifying their outcome
//!
//! Every generated export takes a trailing `*mut RustCallStatus`. After the
//! call the status is mapped onto one of three outcomes:
//! - success, the returned value is lifted normally
//! - an expected error, decoded from the status payload into the declared error type
//! - a fault, either a native panic (with or without a message) or an unknown code
//!
//! Exported functions are reached through plain function pointer casts; every
//! signature is known statically by the bindings.

use crate::codec::{self, Codec, CodecError};
use crate::ffi::buffer::{BufferOps, OwnedBuffer};
use crate::ffi::loader::{LoadError, SymbolSource};
use crate::ffi::types::{CallStatusCode, RustBuffer, RustCallStatus};
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Unrecoverable failures of a native call
///
/// These are never domain errors: they mean the native side crashed or the two
/// sides disagree about the interface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FfiError {
    #[error("native panic: {0}")]
    Panic(String),

    #[error("Rust panicked while handling Rust panic")]
    DoubleFault,

    #[error("unknown status code: {0}")]
    UnknownStatus(i8),

    #[error("function not returning an error returned an error")]
    UndeclaredError,

    #[error("malformed value from native library: {0}")]
    Codec(#[from] CodecError),

    #[error("{0}")]
    Load(#[from] LoadError),
}

/// Outcome of a native call that declares an error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError<E> {
    /// Recoverable error reported by the native library
    #[error("{0}")]
    Expected(E),

    #[error(transparent)]
    Fault(#[from] FfiError),
}

impl<E> CallError<E> {
    /// The typed error, if this is not a fault
    pub fn expected(&self) -> Option<&E> {
        match self {
            CallError::Expected(e) => Some(e),
            CallError::Fault(_) => None,
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, CallError::Fault(_))
    }
}

impl CallError<Infallible> {
    fn into_fault(self) -> FfiError {
        match self {
            CallError::Expected(never) => match never {},
            CallError::Fault(e) => e,
        }
    }
}

/// Classify a finished call, taking ownership of its status payload
pub(crate) fn check_status<E>(
    buffers: BufferOps,
    status: RustCallStatus,
    lift_error: impl FnOnce(OwnedBuffer) -> Result<E, FfiError>,
) -> Result<(), CallError<E>> {
    // Safety: the status payload is a native allocation handed to the caller
    let payload = unsafe { buffers.adopt(status.error_buf) };
    match CallStatusCode::from_raw(status.code) {
        Some(CallStatusCode::Success) => Ok(()),
        Some(CallStatusCode::Error) => Err(CallError::Expected(lift_error(payload)?)),
        Some(CallStatusCode::Panic) if payload.is_empty() => {
            warn!("native library panicked while reporting a panic");
            Err(FfiError::DoubleFault.into())
        }
        Some(CallStatusCode::Panic) => {
            let message = String::from_utf8_lossy(payload.as_slice()).into_owned();
            warn!(%message, "native library panicked");
            Err(FfiError::Panic(message).into())
        }
        None => Err(FfiError::UnknownStatus(status.code).into()),
    }
}

/// Classify a call whose export declares no error type
pub(crate) fn check_undeclared(buffers: BufferOps, status: RustCallStatus) -> Result<(), FfiError> {
    check_status::<Infallible>(buffers, status, |_| Err(FfiError::UndeclaredError))
        .map_err(CallError::into_fault)
}

/// Everything needed to call into one loaded native library
///
/// Cloning is cheap and keeps the library loaded.
#[derive(Clone)]
pub struct FfiRuntime {
    namespace: &'static str,
    source: Arc<dyn SymbolSource>,
    buffers: BufferOps,
}

impl FfiRuntime {
    /// Resolve the buffer housekeeping exports of `namespace`
    pub fn new(namespace: &'static str, source: Arc<dyn SymbolSource>) -> Result<Self, LoadError> {
        let buffers = BufferOps::resolve(source.as_ref(), namespace)?;
        Ok(Self::from_parts(namespace, source, buffers))
    }

    pub fn from_parts(
        namespace: &'static str,
        source: Arc<dyn SymbolSource>,
        buffers: BufferOps,
    ) -> Self {
        Self {
            namespace,
            source,
            buffers,
        }
    }

    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    pub fn buffers(&self) -> BufferOps {
        self.buffers
    }

    /// Resolve an export as a typed function pointer
    ///
    /// # Safety
    ///
    /// `F` must match the exported signature exactly.
    pub unsafe fn function<F: Copy>(&self, symbol: &str) -> Result<F, FfiError> {
        Ok(self.source.resolve(symbol)?.cast())
    }

    /// Encode `value` into a native buffer
    pub fn lower<T: Codec>(&self, value: &T) -> Result<OwnedBuffer, FfiError> {
        let bytes = codec::encode(value)?;
        self.buffers.from_bytes(&bytes)
    }

    /// Top-level strings travel as raw UTF-8 with no length prefix
    pub fn lower_string(&self, value: &str) -> Result<OwnedBuffer, FfiError> {
        self.buffers.from_bytes(value.as_bytes())
    }

    /// Decode a returned buffer, which must be consumed exactly, and free it
    ///
    /// # Safety
    ///
    /// `raw` must be a buffer returned by an export of this runtime's library
    /// and not yet freed; see [`BufferOps::adopt`].
    pub unsafe fn lift<T: Codec>(&self, raw: RustBuffer) -> Result<T, FfiError> {
        let buffer = self.buffers.adopt(raw);
        Ok(codec::decode(buffer.as_slice())?)
    }

    /// Decode a returned top-level string and free its buffer
    ///
    /// A buffer that did not come from the library cannot be lifted from
    /// safe code:
    ///
    /// ```compile_fail
    /// use rgblib_runtime::ffi::{FfiRuntime, RustBuffer};
    ///
    /// fn forge(runtime: &FfiRuntime) -> String {
    ///     let raw = RustBuffer { capacity: 0, len: 4, data: 8 as *mut u8 };
    ///     runtime.lift_string(raw).unwrap_or_default()
    /// }
    /// ```
    ///
    /// # Safety
    ///
    /// Same contract as [`FfiRuntime::lift`].
    pub unsafe fn lift_string(&self, raw: RustBuffer) -> Result<String, FfiError> {
        let buffer = self.buffers.adopt(raw);
        String::from_utf8(buffer.to_vec()).map_err(|e| FfiError::Codec(e.into()))
    }

    /// Call an export that declares no error type
    pub fn call<T>(&self, f: impl FnOnce(&mut RustCallStatus) -> T) -> Result<T, FfiError> {
        let mut status = RustCallStatus::default();
        let value = f(&mut status);
        check_undeclared(self.buffers, status)?;
        Ok(value)
    }

    /// Call an export whose errors decode as `E`
    pub fn call_with_error<E: Codec, T>(
        &self,
        f: impl FnOnce(&mut RustCallStatus) -> T,
    ) -> Result<T, CallError<E>> {
        let mut status = RustCallStatus::default();
        let value = f(&mut status);
        check_status(self.buffers, status, |payload| {
            Ok(codec::decode(payload.as_slice())?)
        })?;
        Ok(value)
    }
}

impl fmt::Debug for FfiRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FfiRuntime")
            .field("namespace", &self.namespace)
            .field("library", &self.source.library_name())
            .finish()
    }
}
