//! Foreign Function Interface (FFI) infrastructure
//!
//! Provides the runtime pieces shared by every generated binding:
//! - ABI records exchanged with the native library
//! - Library loading and symbol resolution
//! - Buffer transport with single-owner release
//! - Call dispatch and status classification
//! - Object handles with lock-free lifetime tracking
//! - Interface version verification

pub mod buffer;
pub mod caller;
pub mod guard;
pub mod handle;
pub mod loader;
pub mod types;


pub use buffer::{BufferOps, OwnedBuffer};
pub use caller::{CallError, FfiError, FfiRuntime};
pub use guard::{verify_interface, InterfaceContract, InterfaceMismatch};
pub use handle::{CallLease, ObjectHandle, ObjectKind, ObjectVtable};
pub use loader::{LibraryLoader, LoadError, NativeLibrary, RawSymbol, SymbolSource};
pub use types::{CallStatusCode, ForeignBytes, ObjectPointer, RustBuffer, RustCallStatus};
