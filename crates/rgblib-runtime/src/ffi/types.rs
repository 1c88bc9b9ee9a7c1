//! C-compatible records shared with the native library
//!
//! Layouts must match the native side bit for bit:
//! - `RustBuffer`: `{ capacity: u64, len: u64, data: *mut u8 }`
//! - `ForeignBytes`: `{ len: i32, data: *const u8 }`
//! - `RustCallStatus`: `{ code: i8, error_buf: RustBuffer }`

use std::ffi::c_void;
use std::ptr;

/// Byte buffer allocated by the native library
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RustBuffer {
    pub capacity: u64,
    pub len: u64,
    pub data: *mut u8,
}

impl RustBuffer {
    /// Buffer with no allocation behind it
    pub const fn empty() -> Self {
        Self {
            capacity: 0,
            len: 0,
            data: ptr::null_mut(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for RustBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

/// Borrowed bytes handed to the native library for copying
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ForeignBytes {
    pub len: i32,
    pub data: *const u8,
}

/// Outcome code written by every native call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum CallStatusCode {
    Success = 0,
    Error = 1,
    Panic = 2,
}

impl CallStatusCode {
    pub fn from_raw(code: i8) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::Error),
            2 => Some(Self::Panic),
            _ => None,
        }
    }
}

/// Out-parameter passed as the last argument of every native call
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RustCallStatus {
    pub code: i8,
    pub error_buf: RustBuffer,
}

impl Default for RustCallStatus {
    fn default() -> Self {
        Self {
            code: CallStatusCode::Success as i8,
            error_buf: RustBuffer::empty(),
        }
    }
}

/// Opaque pointer to a native object
pub type ObjectPointer = *mut c_void;

/// `rustbuffer_from_bytes(bytes, status) -> RustBuffer`
pub type BufferFromBytesFn = unsafe extern "C" fn(ForeignBytes, *mut RustCallStatus) -> RustBuffer;

/// `rustbuffer_free(buffer, status)`
pub type BufferFreeFn = unsafe extern "C" fn(RustBuffer, *mut RustCallStatus);

/// `clone_<object>(pointer, status) -> pointer`
pub type ObjectCloneFn =
    unsafe extern "C" fn(ObjectPointer, *mut RustCallStatus) -> ObjectPointer;

/// `free_<object>(pointer, status)`
pub type ObjectFreeFn = unsafe extern "C" fn(ObjectPointer, *mut RustCallStatus);

/// `uniffi_contract_version() -> u32`
pub type ContractVersionFn = unsafe extern "C" fn() -> u32;

/// `checksum_<symbol>() -> u16`
pub type ChecksumFn = unsafe extern "C" fn() -> u16;
