//! Buffer transport across the native boundary
//!
//! A [`RustBuffer`] is allocated and freed by the native library. On this side
//! every buffer we hold is wrapped in an [`OwnedBuffer`], which frees it exactly
//! once when dropped unless ownership is handed back with
//! [`OwnedBuffer::into_raw`].

use crate::ffi::caller::{check_undeclared, FfiError};
use crate::ffi::loader::{LoadError, SymbolSource};
use crate::ffi::types::{BufferFreeFn, BufferFromBytesFn, ForeignBytes, RustBuffer, RustCallStatus};
use std::fmt;
use std::mem;
use std::slice;
use tracing::error;

/// The native library's buffer allocation entry points
#[derive(Clone, Copy)]
pub struct BufferOps {
    from_bytes: BufferFromBytesFn,
    free: BufferFreeFn,
}

impl BufferOps {
    pub fn new(from_bytes: BufferFromBytesFn, free: BufferFreeFn) -> Self {
        Self { from_bytes, free }
    }

    /// Resolve `ffi_<namespace>_rustbuffer_from_bytes` and `ffi_<namespace>_rustbuffer_free`
    pub fn resolve(source: &dyn SymbolSource, namespace: &str) -> Result<Self, LoadError> {
        let from_bytes = source.resolve(&format!("ffi_{namespace}_rustbuffer_from_bytes"))?;
        let free = source.resolve(&format!("ffi_{namespace}_rustbuffer_free"))?;
        // Safety: both exports are generated with exactly these signatures
        unsafe { Ok(Self::new(from_bytes.cast(), free.cast())) }
    }

    /// Copy `bytes` into a new native buffer
    ///
    /// Empty input never reaches the native allocator.
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<OwnedBuffer, FfiError> {
        if bytes.is_empty() {
            // Safety: an empty buffer owns no allocation
            return Ok(unsafe { self.adopt(RustBuffer::empty()) });
        }
        let len = i32::try_from(bytes.len())
            .map_err(|_| crate::codec::CodecError::LengthOverflow(bytes.len()))?;
        let foreign = ForeignBytes {
            len,
            data: bytes.as_ptr(),
        };

        let mut status = RustCallStatus::default();
        // Safety: `foreign` borrows `bytes` for the duration of the call only
        let raw = unsafe { (self.from_bytes)(foreign, &mut status) };
        check_undeclared(*self, status)?;
        // Safety: the allocator just returned `raw` and nobody else holds it
        Ok(unsafe { self.adopt(raw) })
    }

    /// Take ownership of a buffer the native library handed us
    ///
    /// ```compile_fail
    /// use rgblib_runtime::ffi::{BufferOps, RustBuffer};
    ///
    /// fn forge(ops: BufferOps) -> u8 {
    ///     let raw = RustBuffer { capacity: 0, len: 16, data: 8 as *mut u8 };
    ///     ops.adopt(raw).as_slice()[0]
    /// }
    /// ```
    ///
    /// # Safety
    ///
    /// `raw` must be empty or have been allocated by this library's
    /// `rustbuffer_from_bytes`/by a call returning a buffer, with `len`
    /// initialised bytes at `data`. No other owner may free it afterwards.
    pub unsafe fn adopt(&self, raw: RustBuffer) -> OwnedBuffer {
        OwnedBuffer { raw, ops: *self }
    }

    fn release(&self, raw: RustBuffer) -> Result<(), FfiError> {
        let mut status = RustCallStatus::default();
        // Safety: `raw` came from the native allocator and is released only here
        unsafe { (self.free)(raw, &mut status) };
        check_undeclared(*self, status)
    }
}

impl fmt::Debug for BufferOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferOps").finish_non_exhaustive()
    }
}

/// A native buffer owned by this side
pub struct OwnedBuffer {
    raw: RustBuffer,
    ops: BufferOps,
}

impl OwnedBuffer {
    pub fn len(&self) -> usize {
        self.raw.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.raw.len == 0
    }

    /// Zero-copy view, valid while the buffer is alive
    pub fn as_slice(&self) -> &[u8] {
        if self.raw.data.is_null() || self.raw.len == 0 {
            return &[];
        }
        // Safety: the native allocator guarantees `len` initialised bytes at `data`
        unsafe { slice::from_raw_parts(self.raw.data, self.raw.len as usize) }
    }

    /// Copy the contents out without giving up ownership
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Hand the buffer to the native side, which becomes responsible for freeing it
    pub fn into_raw(self) -> RustBuffer {
        let raw = self.raw;
        mem::forget(self);
        raw
    }

    /// Free now and report failure instead of logging it
    pub fn free(self) -> Result<(), FfiError> {
        let raw = self.raw;
        let ops = self.ops;
        mem::forget(self);
        if Self::is_unallocated(&raw) {
            return Ok(());
        }
        ops.release(raw)
    }

    fn is_unallocated(raw: &RustBuffer) -> bool {
        raw.data.is_null() && raw.capacity == 0
    }
}

impl Drop for OwnedBuffer {
    fn drop(&mut self) {
        if Self::is_unallocated(&self.raw) {
            return;
        }
        if let Err(e) = self.ops.release(self.raw) {
            error!(error = %e, "failed to free native buffer");
        }
    }
}

impl fmt::Debug for OwnedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedBuffer")
            .field("len", &self.raw.len)
            .field("capacity", &self.raw.capacity)
            .finish()
    }
}
