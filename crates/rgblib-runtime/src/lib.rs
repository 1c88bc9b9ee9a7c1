//! rgb_lib runtime - Foreign-function bridge to the rgb_lib native library
//!
//! This library provides everything a host needs to talk to `rgb_lib`:
//! - A big-endian wire codec for values crossing the boundary
//! - Native buffer ownership and call-status handling
//! - Reference-counted handles for native objects
//! - An interface guard run before the first real call
//! - Typed records, errors, functions and objects of the `rgb_lib` API

/// Runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod bindings;
pub mod codec;
pub mod ffi;
pub mod logging;

// Re-export commonly used types
pub use bindings::{
    Address, InitError, Invoice, RecipientInfo, RgbLib, RgbLibError, RgbLibResult,
    TransportEndpoint, Wallet,
};
pub use codec::{decode, encode, ByteReader, Codec, CodecError, CodecResult};
pub use ffi::{CallError, FfiError, InterfaceMismatch, LibraryLoader, LoadError, SymbolSource};
pub use rgblib_config::{LibraryConfig, LoggingConfig};
