//! Interface version guard
//!
//! Before the first real call, the loaded library must report the contract
//! version and per-symbol checksums these bindings were generated against.

use crate::ffi::loader::{LoadError, SymbolSource};
use thiserror::Error;
use tracing::{debug, error};

/// Compiled-in description of the expected native interface
#[derive(Debug, Clone, Copy)]
pub struct InterfaceContract {
    /// Crate name used in diagnostics, e.g. `rgb_lib`
    pub crate_name: &'static str,
    /// Export namespace, e.g. `rgblibuniffi`
    pub namespace: &'static str,
    pub contract_version: u32,
    /// `(symbol suffix, expected checksum)` pairs
    pub checksums: &'static [(&'static str, u16)],
}

impl InterfaceContract {
    /// Full name of the checksum export for `symbol`
    pub fn checksum_symbol(&self, symbol: &str) -> String {
        format!("uniffi_{}_checksum_{}", self.namespace, symbol)
    }
}

/// The library does not implement the interface these bindings expect
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterfaceMismatch {
    #[error("{crate_name}: UniFFI contract version mismatch (expected {expected}, found {found})")]
    ContractVersion {
        crate_name: &'static str,
        expected: u32,
        found: u32,
    },

    #[error("{crate_name}: {symbol}: UniFFI API checksum mismatch (expected {expected}, found {found})")]
    Checksum {
        crate_name: &'static str,
        symbol: String,
        expected: u16,
        found: u16,
    },

    #[error("{crate_name}: {source}")]
    MissingExport {
        crate_name: &'static str,
        source: LoadError,
    },
}

/// Check the loaded library against `contract`, stopping at the first mismatch
pub fn verify_interface(
    source: &dyn SymbolSource,
    contract: &InterfaceContract,
) -> Result<(), InterfaceMismatch> {
    let missing = |source: LoadError| InterfaceMismatch::MissingExport {
        crate_name: contract.crate_name,
        source,
    };

    let found = source
        .contract_version(contract.namespace)
        .map_err(missing)?;
    if found != contract.contract_version {
        error!(
            expected = contract.contract_version,
            found, "native library contract version mismatch"
        );
        return Err(InterfaceMismatch::ContractVersion {
            crate_name: contract.crate_name,
            expected: contract.contract_version,
            found,
        });
    }

    for &(symbol, expected) in contract.checksums {
        let found = source
            .checksum(contract.namespace, symbol)
            .map_err(missing)?;
        if found != expected {
            let symbol = contract.checksum_symbol(symbol);
            error!(%symbol, expected, found, "native library checksum mismatch");
            return Err(InterfaceMismatch::Checksum {
                crate_name: contract.crate_name,
                symbol,
                expected,
                found,
            });
        }
    }

    debug!(
        library = source.library_name(),
        checksums = contract.checksums.len(),
        "native interface verified"
    );
    Ok(())
}
